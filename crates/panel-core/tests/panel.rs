// File: crates/panel-core/tests/panel.rs
// Purpose: Panel orchestration over the in-memory canvas, plus labels, colorbars and debug grid.

mod common;

use common::{assert_approx, sample_mapping};
use panel_core::error::PanelError;
use panel_core::*;

/// Draws nothing; records what it saw.
struct DummyPanel {
    rows: usize,
    cols: usize,
    seen_cells: usize,
    suffix: Option<String>,
}

impl DummyPanel {
    fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, seen_cells: 0, suffix: None }
    }
}

impl<C: Canvas> PanelDefinition<C> for DummyPanel {
    fn name(&self) -> &str { "dummy_panel" }
    fn n_rows(&self) -> usize { self.rows }
    fn n_cols(&self) -> usize { self.cols }

    fn build_panel(&mut self, ctx: &mut PanelContext<'_, C>, _params: &ConfigMapping) -> anyhow::Result<Option<String>> {
        self.seen_cells = ctx.axs.iter().count();
        Ok(self.suffix.clone())
    }
}

fn builder(rows: usize, cols: usize) -> PanelBuilder<DummyPanel, MemoryBackend> {
    PanelBuilder::from_mapping(DummyPanel::new(rows, cols), &sample_mapping(), MemoryBackend).unwrap()
}

#[test]
fn build_returns_canvas_of_panel_size() {
    let mut b = builder(1, 1);
    let canvas = b.build(&ConfigMapping::new()).unwrap();
    let size = canvas.size_inches();
    assert_approx(size.width_in, 10.0 / 2.54);
    assert_approx(size.height_in, 8.0 / 2.54);
    assert_eq!(canvas.regions().len(), 1);
    assert_eq!(b.definition().seen_cells, 1);
}

#[test]
fn artifacts_are_unavailable_before_build() {
    let b = builder(1, 1);
    assert!(matches!(b.canvas(), Err(PanelError::NotYetBuilt(_))));
    assert!(matches!(b.axs_grid(), Err(PanelError::NotYetBuilt(_))));
    assert!(matches!(b.suffix(), Err(PanelError::NotYetBuilt(_))));
    assert!(matches!(b.into_canvas(), Err(PanelError::NotYetBuilt(_))));
}

#[test]
fn axes_grid_has_declared_shape() {
    for (rows, cols) in [(1, 1), (2, 2), (3, 1), (1, 3)] {
        let mut b = builder(rows, cols);
        b.build(&ConfigMapping::new()).unwrap();
        let grid = b.axs_grid().unwrap();
        assert_eq!(grid.rows().count(), rows);
        for row in grid.rows() {
            assert_eq!(row.len(), cols);
        }
    }
}

#[test]
fn single_axes_respects_margins() {
    let mut b = builder(1, 1);
    b.build(&ConfigMapping::new()).unwrap();
    let pos = b.axs_grid().unwrap()[(0, 0)].position();
    assert_approx(pos.x0, 2.0 / 10.0);
    assert_approx(pos.y0, 1.5 / 8.0);
    assert_approx(pos.width, (10.0 - 2.0 - 1.0) / 10.0);
    assert_approx(pos.height, (8.0 - 1.0 - 1.5) / 8.0);
}

#[test]
fn grid_regions_match_layout() {
    let mut b = builder(2, 3);
    b.build(&ConfigMapping::new()).unwrap();
    let layout = b.layout().unwrap();
    let grid = b.axs_grid().unwrap();
    for row in 0..2 {
        for col in 0..3 {
            let ax = grid.get(row, col).unwrap();
            assert_eq!(Some(ax.position()), layout.cell(row, col));
            assert_eq!(b.canvas().unwrap().region_rect(ax.id().unwrap()), Some(ax.position()));
        }
    }
    assert!(grid.get(2, 0).is_none());
}

#[test]
fn empty_grid_declaration_fails_at_construction() {
    let err = PanelBuilder::from_mapping(DummyPanel::new(0, 1), &sample_mapping(), MemoryBackend).err().unwrap();
    assert!(matches!(err, PanelError::InvalidArgument(_)), "{err}");
}

#[test]
fn invalid_config_fails_at_construction() {
    let mut data = sample_mapping();
    data.remove("panel_margins_cm");
    let err = PanelBuilder::from_mapping(DummyPanel::new(1, 1), &data, MemoryBackend).err().unwrap();
    assert!(matches!(err, PanelError::MissingField(_)), "{err}");
}

#[test]
fn suffix_extends_output_stem() {
    let mut b = builder(1, 1);
    b.build(&ConfigMapping::new()).unwrap();
    assert_eq!(b.suffix().unwrap(), None);
    assert_eq!(b.output_stem().unwrap(), "dummy_panel");

    let mut panel = DummyPanel::new(1, 1);
    panel.suffix = Some("variant_a".into());
    let mut b = PanelBuilder::from_mapping(panel, &sample_mapping(), MemoryBackend).unwrap();
    b.build(&ConfigMapping::new()).unwrap();
    assert_eq!(b.suffix().unwrap(), Some("variant_a"));
    assert_eq!(b.output_stem().unwrap(), "dummy_panel_variant_a");
}

/// Uses params and the context helpers.
struct FeaturePanel {
    labels: Vec<PanelLabel>,
}

impl<C: Canvas> PanelDefinition<C> for FeaturePanel {
    fn name(&self) -> &str { "feature_panel" }
    fn n_rows(&self) -> usize { 1 }
    fn n_cols(&self) -> usize { 2 }

    fn build_panel(&mut self, ctx: &mut PanelContext<'_, C>, params: &ConfigMapping) -> anyhow::Result<Option<String>> {
        let width = params.get("colorbar_cm").and_then(ConfigValue::as_f64).unwrap_or(0.5);
        ctx.add_colorbar(0, 1, Side::Right, width, 0.2)?;
        ctx.full_canvas_axes();
        let style = LabelStyle::defaults(ctx.config);
        for (i, ax) in ctx.axs.iter().enumerate() {
            let text = ["a", "b"][i];
            self.labels.push(place_label(ax, text, &style)?);
        }
        Ok(Some("features".into()))
    }
}

#[test]
fn drawing_routine_can_add_colorbar_and_labels() {
    let mut b = PanelBuilder::from_mapping(FeaturePanel { labels: Vec::new() }, &sample_mapping(), MemoryBackend).unwrap();
    let params = ConfigMapping::new().with("colorbar_cm", 0.3);
    b.build(&params).unwrap();

    let before = b.layout().unwrap().cell(0, 1).unwrap();
    let host = b.axs_grid().unwrap()[(0, 1)];
    // shrunk from the right by 0.3 + 0.2 cm
    assert_approx(host.position().x0, before.x0);
    assert_approx(host.position().width, before.width - 0.05);

    let canvas = b.canvas().unwrap();
    // two grid cells, the colorbar strip and the full-canvas region
    assert_eq!(canvas.regions().len(), 4);
    let strip = canvas.regions()[2];
    assert_approx(strip.x0, host.position().x1() + 0.02);
    assert_approx(strip.width, 0.03);
    assert_eq!(canvas.regions()[3], Rect::FULL);
    assert_eq!(canvas.region_rect(host.id().unwrap()), Some(host.position()));

    let labels = &b.definition().labels;
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].text, "a");
    assert_approx(labels[0].x, 0.2 - 0.05);
    assert!(labels[0].bold);
    assert_eq!(b.output_stem().unwrap(), "feature_panel_features");
}

/// Fails while drawing.
struct FailingPanel;

impl<C: Canvas> PanelDefinition<C> for FailingPanel {
    fn name(&self) -> &str { "failing" }
    fn n_rows(&self) -> usize { 1 }
    fn n_cols(&self) -> usize { 1 }
    fn build_panel(&mut self, _ctx: &mut PanelContext<'_, C>, _params: &ConfigMapping) -> anyhow::Result<Option<String>> {
        anyhow::bail!("no data")
    }
}

#[test]
fn drawing_errors_propagate_and_leave_panel_unbuilt() {
    let mut b = PanelBuilder::from_mapping(FailingPanel, &sample_mapping(), MemoryBackend).unwrap();
    let err = b.build(&ConfigMapping::new()).err().unwrap();
    assert!(format!("{err:#}").contains("no data"));
    assert!(matches!(b.canvas(), Err(PanelError::NotYetBuilt(_))));
}

#[test]
fn label_style_from_config() {
    let config = PanelConfig::from_mapping(&sample_mapping()).unwrap();
    let data = sample_mapping().with(
        "features",
        ConfigMapping::from_toml_str(
            r#"
            [label]
            x_cm = 1.0
            y_cm = 1.0
            bold = false
            caps = true
            prefix = "("
            suffix = ")"
            fontsize_pt = 12
            "#,
        )
        .unwrap(),
    );
    let style = LabelStyle::from_mapping(&data, &config).unwrap();
    assert_eq!(style.format("test"), "(TEST)");
    assert!(!style.bold);
    assert_approx(style.fontsize_pt, 12.0);

    let mut fig = Figure::new(CanvasSize::from_cm(10.0, 8.0));
    let id = fig.attach_region(Rect::new(0.2, 0.25, 0.5, 0.5));
    let label = place_label(&fig.region(id).unwrap(), "test", &style).unwrap();
    assert_approx(label.x, 0.1);
    assert_approx(label.y, 0.875);

    let defaults = LabelStyle::from_mapping(&sample_mapping(), &config).unwrap();
    assert_eq!(defaults, LabelStyle::defaults(&config));
    assert_eq!(defaults.format("B"), "b");
    assert_approx(defaults.fontsize_pt, 10.0);

    let bad = sample_mapping().with("features", ConfigMapping::new().with("label", ConfigMapping::new().with("angle", 3.0)));
    assert!(matches!(LabelStyle::from_mapping(&bad, &config), Err(PanelError::UnexpectedField(_))));

    let scalar = sample_mapping().with("features", "label");
    match LabelStyle::from_mapping(&scalar, &config) {
        Err(PanelError::InvalidValue { path, .. }) => assert_eq!(path, "features"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn debug_grid_lines() {
    let grid = DebugGrid::from_mapping(&sample_mapping()).unwrap();
    assert!(grid.show);
    let fig = Figure::new(CanvasSize::from_cm(10.0, 8.0));
    let lines = grid.lines(&fig).unwrap();
    // every 0.5 cm from 0 up to and including the edge
    assert_eq!(lines.vertical.len(), 21);
    assert_eq!(lines.horizontal.len(), 17);
    assert_approx(lines.vertical[1], 0.05);
    assert_approx(*lines.horizontal.last().unwrap(), 1.0);

    assert!(matches!(grid_lines(&fig, 0.0), Err(PanelError::InvalidValue { .. })));
    match grid_lines(&fig, 1e-300) {
        Err(PanelError::InvalidValue { path, .. }) => assert_eq!(path, "debug_panel.grid_res_cm"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
    assert_eq!(DebugGrid::from_mapping(&ConfigMapping::new()).unwrap(), DebugGrid::default());
}
