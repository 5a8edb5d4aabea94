// File: crates/panel-render-skia/tests/render.rs
// Purpose: Build a panel on the Skia backend, render the debug overlay and write a PNG.

use panel_core::error::PanelError;
use panel_core::{
    place_label, Canvas, ConfigMapping, LabelStyle, PanelBuilder, PanelContext, PanelDefinition, PhysicalSize,
};
use panel_render_skia::canvas::pixel_size;
use panel_render_skia::{draw_debug_overlay, save_panel, ImageFormat, OutputSettings, SkiaBackend, SkiaCanvas};

const CONFIG: &str = r#"
[panel_dimensions_cm]
width = 5.08
height = 2.54

[panel_margins_cm]
top = 0.3
bottom = 0.5
left = 0.6
right = 0.2

[font_sizes_pt]
axes = 8.0
text = 7.0

[ax_separation_cm]
x = 0.3
y = 0.2

[debug_panel]
show = true
grid_res_cm = 0.5

[panel_output]
directory = "target/test_out/panels"
format = "png"
dpi = 100
"#;

struct LabelledPanel;

impl PanelDefinition<SkiaCanvas> for LabelledPanel {
    fn name(&self) -> &str { "labelled" }
    fn n_rows(&self) -> usize { 2 }
    fn n_cols(&self) -> usize { 2 }

    fn build_panel(&mut self, ctx: &mut PanelContext<'_, SkiaCanvas>, _params: &ConfigMapping) -> anyhow::Result<Option<String>> {
        let style = LabelStyle::defaults(ctx.config);
        let labels = ["a", "b", "c", "d"];
        for (ax, text) in ctx.axs.iter().zip(labels) {
            let label = place_label(ax, text, &style)?;
            ctx.canvas.draw_label(&label);
        }
        if let Some(id) = ctx.axs[(1, 1)].id() {
            ctx.canvas.fill_region(id, skia_safe::Color::from_argb(255, 230, 240, 255))?;
        }
        Ok(None)
    }
}

#[test]
fn pixel_size_follows_dpi() {
    let size = panel_core::CanvasSize::from_inches(2.0, 1.0);
    assert_eq!(pixel_size(size, 100.0), (200, 100));
    assert_eq!(pixel_size(panel_core::CanvasSize::from_inches(0.0, 0.001), 72.0), (1, 1));
}

#[test]
fn renders_and_saves_png() {
    let data = ConfigMapping::from_toml_str(CONFIG).unwrap();
    let settings = OutputSettings::from_mapping(&data).unwrap();
    assert_eq!(settings.format, ImageFormat::Png);
    assert_eq!(settings.dpi, 100.0);

    let mut builder = PanelBuilder::from_mapping(LabelledPanel, &data, SkiaBackend::from_settings(&settings)).unwrap();
    builder.build(&ConfigMapping::new()).unwrap();
    let stem = builder.output_stem().unwrap();

    let canvas = builder.canvas_mut().unwrap();
    assert_eq!(canvas.regions().len(), 4);
    let size = canvas.size_inches();
    assert!((size.width_in - 2.0).abs() < 1e-9);
    draw_debug_overlay(canvas, &data).unwrap();

    let bytes = canvas.encode_png().unwrap();
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!((img.width(), img.height()), (200, 100));

    let path = save_panel(canvas, &settings, &stem, None).unwrap();
    assert!(path.ends_with("labelled.png"));
    let meta = std::fs::metadata(&path).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn backend_takes_resolution_from_output_settings() {
    let settings = OutputSettings { dpi: 72.0, ..OutputSettings::default() };
    let backend = SkiaBackend::from_settings(&settings);
    assert_eq!(backend.dpi, 72.0);
}

#[test]
fn suffix_is_appended_to_file_name() {
    let settings = OutputSettings { directory: "out".into(), ..OutputSettings::default() };
    assert_eq!(settings.file_path("panel", Some("v2")), std::path::PathBuf::from("out/panel_v2.png"));
    assert_eq!(settings.file_path("panel", None), std::path::PathBuf::from("out/panel.png"));
}

#[test]
fn output_settings_validation() {
    let data = ConfigMapping::from_toml_str("[panel_output]\nformat = \"pdf\"").unwrap();
    assert!(matches!(OutputSettings::from_mapping(&data), Err(PanelError::InvalidArgument(_))));

    let data = ConfigMapping::from_toml_str("[panel_output]\ndpi = 0").unwrap();
    assert!(matches!(OutputSettings::from_mapping(&data), Err(PanelError::InvalidValue { .. })));

    let data = ConfigMapping::from_toml_str("[panel_output]\ncolor = \"red\"").unwrap();
    assert!(matches!(OutputSettings::from_mapping(&data), Err(PanelError::UnexpectedField(_))));

    assert_eq!(OutputSettings::from_mapping(&ConfigMapping::new()).unwrap(), OutputSettings::default());
}

#[test]
fn regions_can_be_moved() {
    let mut canvas = SkiaCanvas::new(panel_core::CanvasSize::from_inches(1.0, 1.0), 50.0, Default::default()).unwrap();
    let id = canvas.attach_region(panel_core::Rect::new(0.1, 0.1, 0.5, 0.5));
    canvas.set_region_rect(id, panel_core::Rect::FULL).unwrap();
    assert_eq!(canvas.region_rect(id), Some(panel_core::Rect::FULL));
    assert!(canvas.set_region_rect(panel_core::RegionId(7), panel_core::Rect::FULL).is_err());
}
