//! Control API routes end to end, minus the sockets.

use embassy_time::Instant;
use plumbob::{
    ButtonEvent,
    Credentials,
    DeviceController,
    MemoryStorage,
    RestartReason,
    SettingsCodec,
    SettingsRecord,
    config::STORAGE_SIZE,
    controllers::api::{Response, handle},
    net::http::HttpMethod,
};
use plumbob_composer::{LedDriver, Rgb};

const N: usize = 16;

struct NullDriver;

impl LedDriver<N> for NullDriver {
    fn write(&mut self, _colors: &[Rgb; N]) {}
}

type Controller = DeviceController<MemoryStorage<STORAGE_SIZE>, NullDriver, N>;

fn unconfigured() -> Controller {
    DeviceController::boot(MemoryStorage::new(), NullDriver, 1, Instant::from_millis(0)).unwrap()
}

fn connected() -> Controller {
    let mut codec = SettingsCodec::new(MemoryStorage::new());
    codec
        .save_credentials(&Credentials::new("MyNet", "secret123").unwrap())
        .unwrap();
    codec.save(&SettingsRecord::new()).unwrap();
    DeviceController::boot(codec.into_inner(), NullDriver, 1, Instant::from_millis(0)).unwrap()
}

struct Exchange {
    response: Response,
    body: [u8; 1024],
}

impl Exchange {
    fn status(&self) -> u16 {
        self.response.status()
    }

    fn body(&self) -> &str {
        core::str::from_utf8(&self.body[..self.response.body_len]).unwrap()
    }
}

fn send(controller: &mut Controller, method: HttpMethod, path: &str, body: &str) -> Exchange {
    let mut out = [0u8; 1024];
    let response = handle(controller, method, path, body.as_bytes(), &mut out);
    Exchange {
        response,
        body: out,
    }
}

// -----------------------------------------------------------------------------
// Connected routes
// -----------------------------------------------------------------------------

#[test]
fn enable_and_brightness() {
    let mut controller = connected();
    let reply = send(&mut controller, HttpMethod::Post, "/enable", r#"{"enabled": true}"#);
    assert_eq!(reply.status(), 200);
    assert_eq!(reply.body(), "OK");
    assert!(controller.settings().enabled);

    let reply = send(&mut controller, HttpMethod::Post, "/brightness", r#"{"brightness":180}"#);
    assert_eq!(reply.status(), 200);
    assert_eq!(controller.settings().brightness, 180);
}

#[test]
fn settings_route_ignores_unknown_keys() {
    let mut controller = connected();
    let body = r#"{"mode": 9, "cooling": 80, "sparks": 200, "flavour": "mint"}"#;
    let reply = send(&mut controller, HttpMethod::Post, "/settings", body);
    assert_eq!(reply.status(), 200);

    let fire = controller.settings().effects.fire;
    assert_eq!(controller.settings().mode, 9);
    assert_eq!(fire.cooling, 80);
    assert_eq!(fire.sparks, 200);
    assert_eq!(fire.speed, 25);
    assert!(!fire.reverse);
}

#[test]
fn static_color_needs_all_channels() {
    let mut controller = connected();
    let body = r#"{"mode": 10, "red": 10, "green": 20}"#;
    send(&mut controller, HttpMethod::Post, "/settings", body);
    assert_eq!(controller.settings().effects.static_color, Rgb::new(255, 255, 255));

    let body = r#"{"mode": 10, "red": 10, "green": 20, "blue": 30}"#;
    send(&mut controller, HttpMethod::Post, "/settings", body);
    assert_eq!(controller.settings().effects.static_color, Rgb::new(10, 20, 30));
}

#[test]
fn malformed_bodies_change_nothing() {
    let mut controller = connected();
    for (path, body) in [
        ("/enable", ""),
        ("/enable", r#"{"enabled": "yes"}"#),
        ("/brightness", r#"{"brightness": -1}"#),
        ("/settings", r#"{"speed": 3}"#),
        ("/settings", r#"{"mode": 1, "speed": 3"#),
    ] {
        let reply = send(&mut controller, HttpMethod::Post, path, body);
        assert_eq!(reply.status(), 400, "{path} {body}");
    }
    assert_eq!(*controller.settings(), SettingsRecord::new());
}

#[test]
fn unknown_mode_is_bad_request() {
    let mut controller = connected();
    let reply = send(&mut controller, HttpMethod::Post, "/settings", r#"{"mode": 11}"#);
    assert_eq!(reply.status(), 400);
    assert_eq!(controller.settings().mode, 0);
}

#[test]
fn save_persists_current_settings() {
    let mut controller = connected();
    send(&mut controller, HttpMethod::Post, "/brightness", r#"{"brightness": 300}"#);
    let writes = controller.storage().writes();
    let reply = send(&mut controller, HttpMethod::Post, "/save", "");
    assert_eq!(reply.status(), 200);
    assert_eq!(controller.storage().writes(), writes + 1);
    assert_eq!(&controller.storage().as_bytes()[128..130], &[0x01, 0x2C]);
}

#[test]
fn snapshot_json_field_order() {
    let mut controller = connected();
    let reply = send(&mut controller, HttpMethod::Get, "/get_settings", "");
    assert_eq!(reply.status(), 200);
    assert_eq!(
        reply.body(),
        concat!(
            r#"{"brightness":5,"mode":0,"led_enabled":false,"#,
            r#""full_rainbow_speed":40,"animated_rainbow_speed":5,"#,
            r#""random_static_color":100,"random_static_color_speed":2,"#,
            r#""animated_palette_speed":5,"fade_to_black_speed":10,"#,
            r#""fade_to_black_fade_speed":2,"bpm_color":30,"fade_color_speed":5,"#,
            r#""b_rgb_color":"33,150,243","fire_speed":25,"fire_cooling":55,"#,
            r#""fire_sparks":120,"fire_reverse":false,"s_rgb_color":"255,255,255"}"#,
        )
    );
}

// -----------------------------------------------------------------------------
// State gating
// -----------------------------------------------------------------------------

#[test]
fn configuration_route_only_while_unconfigured() {
    let mut controller = connected();
    let body = r#"{"ssid": "Other", "password": "pw"}"#;
    let reply = send(&mut controller, HttpMethod::Post, "/configuration", body);
    assert_eq!(reply.status(), 404);
    assert_eq!(reply.body(), "Not found");
    assert_eq!(controller.pending_restart(), None);
}

#[test]
fn control_routes_hidden_while_unconfigured() {
    let mut controller = unconfigured();
    let reply = send(&mut controller, HttpMethod::Get, "/get_settings", "");
    assert_eq!(reply.status(), 404);
    let reply = send(&mut controller, HttpMethod::Post, "/enable", r#"{"enabled": true}"#);
    assert_eq!(reply.status(), 404);
    assert!(!controller.settings().enabled);
}

#[test]
fn configuration_stores_credentials() {
    let mut controller = unconfigured();
    let body = r#"{"ssid": "MyNet", "password": "secret123"}"#;
    let reply = send(&mut controller, HttpMethod::Post, "/configuration", body);
    assert_eq!(reply.status(), 200);
    assert_eq!(controller.pending_restart(), Some(RestartReason::Provisioned));
    assert_eq!(controller.storage().as_bytes()[1], 5);
}

#[test]
fn oversize_ssid_is_rejected() {
    let mut controller = unconfigured();
    let body = r#"{"ssid": "0123456789012345678901234567890123", "password": "pw"}"#;
    let reply = send(&mut controller, HttpMethod::Post, "/configuration", body);
    assert_eq!(reply.status(), 400);
    assert_eq!(controller.pending_restart(), None);
}

#[test]
fn requests_during_reset_grace_are_refused() {
    let mut controller = connected();
    send(&mut controller, HttpMethod::Post, "/brightness", r#"{"brightness": 90}"#);
    controller
        .handle_button_event(ButtonEvent::LongPress)
        .unwrap();

    let reply = send(&mut controller, HttpMethod::Post, "/save", "");
    assert_eq!(reply.status(), 503);
    assert_eq!(reply.body(), "Restarting");
    let reply = send(&mut controller, HttpMethod::Post, "/enable", r#"{"enabled": true}"#);
    assert_eq!(reply.status(), 503);

    assert!(controller.storage().as_bytes().iter().all(|b| *b == 0));
}

#[test]
fn preflight_and_unknown_routes() {
    let mut controller = connected();
    let reply = send(&mut controller, HttpMethod::Options, "/anything", "");
    assert_eq!(reply.status(), 200);
    assert_eq!(reply.body(), "");

    let reply = send(&mut controller, HttpMethod::Get, "/nope", "");
    assert_eq!(reply.status(), 404);
    assert_eq!(reply.body(), "Not found");

    let reply = send(&mut controller, HttpMethod::Get, "/enable", "");
    assert_eq!(reply.status(), 404);
}
