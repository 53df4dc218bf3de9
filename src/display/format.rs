//! Duration text formatting.

/// Build the compact countdown text for a remaining-seconds value.
///
/// Shape is `H:MM:SS` with the hour field omitted below one hour. Minutes
/// get a leading zero only when below ten and the overall value is above
/// 599 seconds; seconds are zero-padded below ten whenever a minutes or
/// hour field precedes them. A bare sub-minute value renders unpadded, so
/// zero renders as `"0"`.
pub fn format_duration(remaining_seconds: u32) -> String {
    let hours = remaining_seconds / 3600;
    let minutes = (remaining_seconds % 3600) / 60;
    let seconds = remaining_seconds % 60;

    let mut text = String::new();

    if hours > 0 {
        text.push_str(&format!("{hours}:"));
    }

    if minutes > 0 || hours > 0 {
        if minutes < 10 && remaining_seconds > 599 {
            text.push_str(&format!("0{minutes}:"));
        } else {
            text.push_str(&format!("{minutes}:"));
        }
    }

    if seconds < 10 && (minutes > 0 || hours > 0) {
        text.push_str(&format!("0{seconds}"));
    } else {
        text.push_str(&format!("{seconds}"));
    }

    text
}

/// Build the verbose duration text shown on step descriptions.
///
/// `"N hour(s) M minute(s)"` with each unit pluralized independently and the
/// minutes clause omitted when zero; durations under an hour always render
/// minutes only.
pub fn format_minutes_verbose(duration_minutes: u32) -> String {
    let hours = duration_minutes / 60;
    let minutes = duration_minutes % 60;

    if hours == 0 {
        return format!("{} {}", minutes, pluralize(minutes, "minute"));
    }

    let mut text = format!("{} {}", hours, pluralize(hours, "hour"));
    if minutes > 0 {
        text.push_str(&format!(" {} {}", minutes, pluralize(minutes, "minute")));
    }
    text
}

fn pluralize(value: u32, unit: &str) -> String {
    if value == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}
