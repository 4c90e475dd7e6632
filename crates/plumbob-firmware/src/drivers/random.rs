use esp_hal::rng::Rng;

/// 64-bit seed from the hardware RNG. Only meaningful once the radio is
/// running, before that the RNG is fed by the boot entropy only.
pub(crate) fn get_seed() -> u64 {
    let rng = Rng::new();
    u64::from(rng.random()) << 32 | u64::from(rng.random())
}
