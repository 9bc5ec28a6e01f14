use crate::core::constants::MINUTES_PER_DAY;

/// Formats whole game minutes as `Day N • HH:MM`, starting at day 1.
pub fn format_game_time(total_minutes: u64) -> String {
    let day = total_minutes / MINUTES_PER_DAY + 1;
    let minute_of_day = total_minutes % MINUTES_PER_DAY;
    format!(
        "Day {} • {:02}:{:02}",
        day,
        minute_of_day / 60,
        minute_of_day % 60
    )
}
