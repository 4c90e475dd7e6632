//! The one device controller, shared by the render and HTTP tasks. Every
//! access is a short synchronous closure, nothing is held across an await.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use plumbob::{DeviceController, config::LED_COUNT};

use crate::drivers::{PartitionStorage, StripDriver};

pub(crate) type Device = DeviceController<PartitionStorage, StripDriver, LED_COUNT>;
pub(crate) type SharedDevice = Mutex<CriticalSectionRawMutex, RefCell<Device>>;

pub(crate) fn with_device<R>(shared: &SharedDevice, f: impl FnOnce(&mut Device) -> R) -> R {
    shared.lock(|cell| f(&mut cell.borrow_mut()))
}
