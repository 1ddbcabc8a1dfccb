//! The home every fresh process starts with.

use homecontrol_domain::device::{Device, DeviceKind, MOCK_ESP_PREFIX};
use homecontrol_domain::error::HomeControlError;
use homecontrol_domain::home::Home;
use homecontrol_domain::id::RoomId;
use homecontrol_domain::room::{Room, RoomIcon};
use homecontrol_domain::settings::Settings;
use homecontrol_domain::tank::TankState;

struct DemoDevice {
    room: usize,
    kind: DeviceKind,
    name: &'static str,
    value: u8,
    host: u8,
    gpio_pin: u8,
}

const ROOMS: [(&str, RoomIcon, bool); 4] = [
    ("Living Room", RoomIcon::Sofa, false),
    ("Kitchen", RoomIcon::Utensils, false),
    ("Bedroom", RoomIcon::Bed, false),
    ("Utility", RoomIcon::Droplets, true),
];

const DEVICES: [DemoDevice; 4] = [
    DemoDevice {
        room: 0,
        kind: DeviceKind::Light,
        name: "Main Light",
        value: 80,
        host: 101,
        gpio_pin: 5,
    },
    DemoDevice {
        room: 0,
        kind: DeviceKind::Fan,
        name: "Ceiling Fan",
        value: 3,
        host: 102,
        gpio_pin: 4,
    },
    DemoDevice {
        room: 1,
        kind: DeviceKind::Light,
        name: "Kitchen Strip",
        value: 100,
        host: 103,
        gpio_pin: 12,
    },
    DemoDevice {
        room: 3,
        kind: DeviceKind::Motor,
        name: "Main Pump",
        value: 0,
        host: 104,
        gpio_pin: 13,
    },
];

/// Build the demo home with default settings and the tank at 65 % in
/// automatic mode.
///
/// # Errors
///
/// Returns a validation error if the hardcoded data is inconsistent.
pub fn demo_home() -> Result<Home, HomeControlError> {
    let rooms = ROOMS
        .iter()
        .map(|&(name, icon, has_tank_widget)| {
            Room::builder()
                .name(name)
                .icon(icon)
                .has_tank_widget(has_tank_widget)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let room_ids: Vec<RoomId> = rooms.iter().map(|r| r.id).collect();

    let devices = DEVICES
        .iter()
        .map(|d| {
            Device::builder()
                .room_id(room_ids[d.room])
                .kind(d.kind)
                .name(d.name)
                .value(d.value)
                .ip_address(format!("{MOCK_ESP_PREFIX}{}", d.host))
                .gpio_pin(d.gpio_pin)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        rooms = rooms.len(),
        devices = devices.len(),
        "demo home created"
    );
    Home::new(rooms, devices, TankState::default(), Settings::default())
}
