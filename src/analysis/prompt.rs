use crate::metrics::SessionStatistics;

/// Builds the augmentation prompt.
///
/// Only numeric summaries are interpolated; no client-supplied text reaches
/// the model.
pub fn build_prompt(stats: &SessionStatistics, duration_ms: i64) -> String {
    let duration_secs = (duration_ms.max(0) as f64 / 1000.0).round() as i64;

    format!(
        "Missile shooting analysis:\n\
         Game Duration: {duration_secs} seconds\n\
         Total Shots: {shots}\n\
         Hit Rate: {hit_rate:.1}%\n\
         Average Response Time: {response_time:.0}ms\n\
         Average Target Distance: {distance:.0} units\n\
         \n\
         Analyze the player's:\n\
         1. Shooting accuracy level (beginner/intermediate/advanced)\n\
         2. Shooting style (precise/rapid/balanced)\n\
         3. Main strength in missile combat\n\
         4. Improvement tip for missile accuracy\n\
         \n\
         Be brief, under 100 words.",
        shots = stats.shot_count,
        hit_rate = stats.hit_rate,
        response_time = stats.average_response_time,
        distance = stats.average_target_distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarises_session_numbers() {
        let stats = SessionStatistics {
            shot_count: 12,
            hit_count: 9,
            hit_rate: 75.0,
            average_response_time: 412.4,
            average_target_distance: 350.6,
        };

        let prompt = build_prompt(&stats, 61_600);

        assert!(prompt.starts_with("Missile shooting analysis:\n"));
        assert!(prompt.contains("Game Duration: 62 seconds\n"));
        assert!(prompt.contains("Total Shots: 12\n"));
        assert!(prompt.contains("Hit Rate: 75.0%\n"));
        assert!(prompt.contains("Average Response Time: 412ms\n"));
        assert!(prompt.contains("Average Target Distance: 351 units\n"));
        assert!(prompt.ends_with("Be brief, under 100 words."));
    }

    #[test]
    fn negative_duration_reported_as_zero() {
        let prompt = build_prompt(&SessionStatistics::default(), -5);
        assert!(prompt.contains("Game Duration: 0 seconds"));
        assert!(prompt.contains("Hit Rate: 0.0%"));
    }
}
