use regex::Regex;
use std::sync::LazyLock;

const SECONDS_PER_WEEK: u64 = 7 * 24 * 3600;
const SECONDS_PER_DAY: u64 = 24 * 3600;

/// `PnWnDTnHnMnS`. Years and months have no fixed length and are rejected.
static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").unwrap()
});

/// Convert an ISO-8601 period such as `PT1H2M3S` into total seconds.
///
/// Missing components count as zero. Anything that does not match the grammar
/// yields 0 instead of an error, so one odd value never sinks a whole batch.
pub fn parse_iso8601_duration(value: &str) -> u64 {
    let Some(captures) = ISO_DURATION.captures(value.trim()) else {
        tracing::debug!(duration = value, "Unparseable video duration, using 0");
        return 0;
    };

    let component = |index: usize, unit: u64| {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
            .saturating_mul(unit)
    };

    [
        component(1, SECONDS_PER_WEEK),
        component(2, SECONDS_PER_DAY),
        component(3, 3600),
        component(4, 60),
        component(5, 1),
    ]
    .into_iter()
    .fold(0u64, u64::saturating_add)
}
