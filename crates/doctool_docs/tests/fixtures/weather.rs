// Fixture source for doc index tests. Not compiled.

/// Gets the current temperature for a location.
///
/// @param location [String] The city and state, e.g. San Francisco, CA.
/// @param unit [String] The unit of temperature.
/// @values unit ["Celsius", "Fahrenheit"]
#[describe]
pub fn get_current_temperature(location: String, unit: String) -> String {
    format!("{location}: 21 {unit}")
}

/// Summarizes forecast readings.
///
/// @param readings [Array<Float>] Hourly readings.
/// @items_type readings Float
/// @min_items readings 1
/// @max_items readings 48
pub fn summarize(readings: Vec<f64>) -> f64 {
    readings.iter().sum()
}

pub fn missing_yard(text: String) -> String {
    text
}
