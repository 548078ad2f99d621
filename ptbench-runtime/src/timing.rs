use std::time::{Duration, Instant};

/// Run `func` once and return its value together with the wall-clock time it took.
pub fn time_call<T, F>(func: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = func();
    (value, start.elapsed())
}

/// Like [`time_call`] for fallible work; the duration is only reported on success.
pub fn time_fallible<T, E, F>(func: F) -> Result<(T, Duration), E>
where
    F: FnOnce() -> Result<T, E>,
{
    let (result, elapsed) = time_call(func);
    result.map(|value| (value, elapsed))
}

/// Duration as fractional seconds, the unit results are recorded in.
pub fn seconds(duration: Duration) -> f64 {
    duration.as_secs_f64()
}
