// File: crates/panel-core/tests/common/mod.rs
// Purpose: Shared fixture configuration and float comparison for integration tests.

#![allow(dead_code)]

use panel_core::ConfigMapping;

pub const SAMPLE_TOML: &str = r#"
[panel_dimensions_cm]
width = 10.0
height = 8.0

[panel_margins_cm]
top = 1.0
bottom = 1.5
left = 2.0
right = 1.0

[font_sizes_pt]
axes = 12.0
text = 10.0

[ax_separation_cm]
x = 0.5
y = 1.0

[debug_panel]
show = true
grid_res_cm = 0.5

[panel_output]
directory = "target/test_out"
format = "png"
dpi = 600
"#;

pub fn sample_mapping() -> ConfigMapping {
    ConfigMapping::from_toml_str(SAMPLE_TOML).expect("sample config parses")
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[track_caller]
pub fn assert_approx(got: f64, want: f64) {
    assert!(approx_eq(got, want), "expected {want}, got {got}");
}
