use flextype::{Breakpoint, Lock, Resolution, SizeDetails};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(rules: &str, runs: &[(f64, SizeDetails)], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Rules: {}", rules.trim()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Breakpoints ━━━", ansi::GRAY));
    match runs.first() {
        Some((_, details)) if !details.breakpoints.is_empty() => print_breakpoints(&details.breakpoints, &palette),
        _ => {
            println!("{}", palette.dim("  No breakpoints declared"));
            println!("\n{}", palette.dim("  Tip: Set FLEXTYPE_LOG=debug to see skipped rule entries"));
        }
    }

    println!("\n{}", palette.paint("━━━ Sizes ━━━", ansi::GRAY));
    for (width, details) in runs {
        print_size(*width, details, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    for (width, details) in runs {
        let parse = match details.metrics.parse {
            Some(d) => palette.paint(format!("{d:?}"), ansi::CYAN),
            None => palette.dim("cached"),
        };
        println!(
            "  {}  Total: {}  │  Parse: {}  │  Interpolate: {}",
            palette.paint(format!("{width}px"), ansi::YELLOW),
            palette.paint(format!("{:?}", details.metrics.total), ansi::GREEN),
            parse,
            palette.dim(format!("{:?}", details.metrics.interpolate)),
        );
    }
    println!();
}

fn print_breakpoints(breakpoints: &[Breakpoint], palette: &ansi::Palette) {
    for (idx, bp) in breakpoints.iter().enumerate() {
        println!(
            "  {} {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(format!("{}px", bp.width), ansi::YELLOW),
            palette.dim("→"),
            palette.bold(palette.paint(format!("{}px", bp.value), ansi::GREEN)),
            palette.paint(lock_label(bp.lock), ansi::BLUE),
        );
    }
}

fn print_size(width: f64, details: &SizeDetails, palette: &ansi::Palette) {
    let eval = &details.evaluation;
    println!(
        "  {} {} {} {}",
        palette.paint(format!("{width}px"), ansi::YELLOW),
        palette.dim("→"),
        palette.bold(palette.paint(flextype::css::format_px(details.value), ansi::GREEN)),
        palette.dim(if details.cache_hit { "(cache hit)" } else { "(parsed)" }),
    );
    println!(
        "      {} {}  {} {}  {} {}",
        palette.dim("start:"),
        palette.paint(fmt_bound(eval.start.as_ref()), ansi::CYAN),
        palette.dim("│ end:"),
        palette.paint(fmt_bound(eval.end.as_ref()), ansi::CYAN),
        palette.dim("│ via:"),
        palette.paint(resolution_label(eval.resolution), ansi::BLUE),
    );
}

fn fmt_bound(bp: Option<&Breakpoint>) -> String {
    match bp {
        Some(bp) => format!("{}px@{}", bp.value, bp.width),
        None => "-".to_string(),
    }
}

fn lock_label(lock: Lock) -> &'static str {
    if lock == Lock::BOTH {
        "locked ±"
    } else if lock.contains(Lock::UP) {
        "locked +"
    } else if lock.contains(Lock::DOWN) {
        "locked -"
    } else {
        ""
    }
}

fn resolution_label(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::AtStart => "exact",
        Resolution::LockedUp => "locked above start",
        Resolution::LockedDown => "locked below end",
        Resolution::Scaled => "scaled from origin",
        Resolution::Interpolated => "interpolated",
        Resolution::Empty => "no breakpoints",
    }
}
