use brightsky_core::{CurrentWeatherResult, DailyDataPoint, DailyForecastResult, Reading};

pub fn current(result: &CurrentWeatherResult) -> String {
    let now = &result.currently;
    format!("{} {} {}", now.icon.emoji(), degrees(&now.temperature), now.summary)
}

pub fn forecast(result: &DailyForecastResult) -> String {
    let daily = &result.daily;
    let mut out = format!("{} {}", daily.icon.emoji(), daily.summary);

    for day in &daily.data {
        out.push('\n');
        out.push_str(&forecast_day(day));
    }

    out
}

fn forecast_day(day: &DailyDataPoint) -> String {
    let date = day
        .date()
        .map(|d| d.format("%a %b %d").to_string())
        .unwrap_or_else(|| day.time.to_string());

    format!(
        "  {date}  {}  {:>4} / {:<4}  {}",
        day.icon.emoji(),
        degrees(&day.temperature_high),
        degrees(&day.temperature_low),
        day.summary
    )
}

fn degrees(reading: &Reading) -> String {
    format!("{:.0}°", reading.value())
}
