use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// HTTP client internals stay quiet unless RUST_LOG asks for them.
const QUIET_DEPENDENCIES: &str = "reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn";

/// Default directives when RUST_LOG is unset.
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("print_my_card={},{},warn", level, QUIET_DEPENDENCIES)
}

fn card_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(card_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON 格式，給服務端或收集器使用
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(card_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(EnvFilter::try_new(&directives).is_ok(), "{}", directives);
            assert!(directives.contains("reqwest=warn"));
        }
        assert!(default_directives(true).starts_with("print_my_card=debug"));
        assert!(default_directives(false).starts_with("print_my_card=info"));
    }
}
