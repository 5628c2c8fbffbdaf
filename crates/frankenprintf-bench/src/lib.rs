//! Shared benchmark workloads for frankenprintf.

use frankenprintf_core::Arg;

/// A named template with representative arguments.
pub struct Workload {
    pub name: &'static str,
    pub template: &'static str,
    pub args: Vec<Arg<'static>>,
}

/// Templates exercising each conversion family and a mixed log line.
#[must_use]
pub fn workloads() -> Vec<Workload> {
    vec![
        Workload {
            name: "int",
            template: "%d",
            args: vec![Arg::from(-123_456_i32)],
        },
        Workload {
            name: "int_padded_hex",
            template: "%#018x",
            args: vec![Arg::from(0xdead_beef_u64)],
        },
        Workload {
            name: "float_fixed",
            template: "%.3f",
            args: vec![Arg::from(3.141_592_653_589_793)],
        },
        Workload {
            name: "float_general",
            template: "%g",
            args: vec![Arg::from(6.022e23)],
        },
        Workload {
            name: "float_hex",
            template: "%a",
            args: vec![Arg::from(0.1)],
        },
        Workload {
            name: "string_padded",
            template: "%-24s",
            args: vec![Arg::from("frankenprintf")],
        },
        Workload {
            name: "log_line",
            template: "[%5s] %-12s req=%08x latency=%.2fms status=%d",
            args: vec![
                Arg::from("INFO"),
                Arg::from("http.server"),
                Arg::from(48_879_u32),
                Arg::from(12.345),
                Arg::from(200),
            ],
        },
    ]
}
