//! Backdrop selection: a pure mapping from the current condition category
//! to a fixed background image reference, recomputed whenever the current
//! conditions change. Nothing here is stored.

use crate::model::Condition;

pub const CLEAR: &str = "https://images.unsplash.com/photo-1506744038136-46273834b3fb";
pub const CLOUDS: &str = "https://images.unsplash.com/photo-1499346030926-9a72daac6c63";
pub const RAIN: &str = "https://images.unsplash.com/photo-1501594907352-04cda38ebc29";
pub const SNOW: &str = "https://images.unsplash.com/photo-1608889175663-d9a39c49f4d0";
pub const DEFAULT: &str = "https://images.unsplash.com/photo-1503264116251-35a269479413";

/// Background image reference for a condition category.
pub fn image_for(condition: &Condition) -> &'static str {
    match condition {
        Condition::Clear => CLEAR,
        Condition::Clouds => CLOUDS,
        Condition::Rain => RAIN,
        Condition::Snow => SNOW,
        Condition::Other(_) => DEFAULT,
    }
}

/// Provider-hosted icon bitmap URL for an OpenWeather icon identifier.
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}
