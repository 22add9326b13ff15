mod classify;
mod day;
mod normalize;

pub use classify::classify;
pub use day::parse_day;
pub use normalize::normalize;

/// Compiles a CSS selector once and hands back a `&'static Selector`.
/// Panics on first use if the literal is not valid CSS; every selector in
/// this crate is a fixed string, so that is a programming error.
macro_rules! selector {
    ($css:literal) => {{
        static CELL: std::sync::OnceLock<scraper::Selector> = std::sync::OnceLock::new();
        CELL.get_or_init(|| {
            scraper::Selector::parse($css)
                .unwrap_or_else(|e| panic!("invalid selector {:?}: {e:?}", $css))
        })
    }};
}
pub(crate) use selector;
