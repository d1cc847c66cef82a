use crate::model::ForecastIcon;

/// Glyph shown next to a forecast icon code.
///
/// Total over the icon vocabulary; unrecognised codes get the
/// partly-cloudy-day glyph.
pub fn forecast_emoji(icon: &ForecastIcon) -> &'static str {
    match icon {
        ForecastIcon::ClearDay => "☀️",
        ForecastIcon::ClearNight => "🌜",
        ForecastIcon::Rain => "🌧",
        ForecastIcon::Snow => "❄️",
        ForecastIcon::Sleet => "⛸",
        ForecastIcon::Wind => "💨",
        ForecastIcon::Fog => "🌫",
        ForecastIcon::Cloudy => "☁️",
        ForecastIcon::PartlyCloudyDay => "🌤",
        ForecastIcon::PartlyCloudyNight => "🌥",
        ForecastIcon::Error => "😢",
        ForecastIcon::Unrecognized(_) => "🌤",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_has_a_glyph() {
        for icon in ForecastIcon::all() {
            let glyph = forecast_emoji(icon);
            assert!(!glyph.is_empty(), "{icon} has no glyph");
            assert_eq!(glyph, forecast_emoji(icon));
        }
    }

    #[test]
    fn known_glyphs() {
        assert_eq!(forecast_emoji(&ForecastIcon::ClearDay), "☀️");
        assert_eq!(forecast_emoji(&ForecastIcon::Sleet), "⛸");
        assert_eq!(forecast_emoji(&ForecastIcon::Error), "😢");
        assert_eq!(ForecastIcon::PartlyCloudyNight.emoji(), "🌥");
    }

    #[test]
    fn unrecognised_icon_falls_back_to_partly_cloudy_day() {
        let icon = ForecastIcon::from("thunderstorm");
        assert_eq!(forecast_emoji(&icon), forecast_emoji(&ForecastIcon::PartlyCloudyDay));
    }
}
