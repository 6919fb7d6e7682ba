use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("projadm=debug,info")
        } else {
            EnvFilter::new("projadm=info")
        }
    })
}

pub fn init_cli_logger(debug: bool) {
    // 非除錯模式只輸出訊息本身
    let layer = tracing_subscriber::fmt::layer()
        .with_target(debug)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if debug {
        tracing_subscriber::registry()
            .with(default_filter(true))
            .with(layer.compact())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(default_filter(false))
            .with(layer.without_time().with_level(false).compact())
            .init();
    }
}

pub fn init_json_logger(debug: bool) {
    tracing_subscriber::registry()
        .with(default_filter(debug))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}
