use std::time::Instant;

/// Run `f` and log how long it took, whatever it returned.
pub fn report_time<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start  = Instant::now();
    let result = f();
    tracing::info!("{} finished in {:.2?}", label, start.elapsed());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_result_through() {
        let out: Result<u32, String> = report_time("unit", || Ok(7));
        assert_eq!(out, Ok(7));
    }
}
