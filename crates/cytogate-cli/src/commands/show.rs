//! Show command implementation

use crate::cli::ShowArgs;
use crate::config_loader::open_session;
use crate::output::OutputWriter;
use crate::output_types::{GateInfo, PointInfo, ShowOutput};
use anyhow::Result;
use cytogate_core::config::LayeredConfig;
use cytogate_engine::classifier::count_matches;
use cytogate_geo::models::GateGeometryExt;
use tabled::Tabled;

pub fn execute(args: ShowArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let workbench = open_session(config, &args.session)?;

    let gates: Vec<GateInfo> = workbench
        .gates()
        .iter()
        .map(|gate| GateInfo {
            name: gate.name.clone(),
            color: gate.color.clone(),
            plot: gate.plot(),
            vertex_count: gate.vertices.len(),
            visible: gate.visible,
            area: gate.signed_area().abs(),
            centroid: gate.centroid_coords(),
            matches: count_matches(gate, workbench.points()),
        })
        .collect();
    let groups = workbench.groups();
    let unclassified_count = workbench.points().iter().filter(|p| !p.is_classified()).count();

    let points = args.points.then(|| {
        workbench
            .points()
            .iter()
            .map(|p| PointInfo {
                a: p.coord_a,
                b: p.coord_b,
                group: p.group.clone(),
                display_color: workbench.display_color(p).to_string(),
            })
            .collect::<Vec<_>>()
    });

    if output.is_json() {
        output.result(ShowOutput {
            session: args.session,
            point_count: workbench.points().len(),
            unclassified_count,
            gates,
            groups,
            points,
        })?;
        return Ok(());
    }

    output.section(format!("Session '{}'", args.session));
    output.kv("Points", workbench.points().len());
    output.kv("Unclassified", unclassified_count);

    output.section("Gates");

    #[derive(Tabled)]
    struct GateRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Color")]
        color: String,
        #[tabled(rename = "Plot")]
        plot: String,
        #[tabled(rename = "Vertices")]
        vertices: usize,
        #[tabled(rename = "Visible")]
        visible: &'static str,
        #[tabled(rename = "Area")]
        area: String,
        #[tabled(rename = "Would Dye")]
        matches: usize,
    }

    output.table(
        gates
            .into_iter()
            .map(|g| GateRow {
                name: g.name,
                color: g.color,
                plot: g.plot.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
                vertices: g.vertex_count,
                visible: if g.visible { "✓" } else { "✗" },
                area: format!("{:.1}", g.area),
                matches: g.matches,
            })
            .collect(),
    );

    output.section("Groups");

    #[derive(Tabled)]
    struct GroupRow {
        #[tabled(rename = "Group")]
        name: String,
        #[tabled(rename = "Color")]
        color: String,
        #[tabled(rename = "Points")]
        count: usize,
        #[tabled(rename = "Visible")]
        visible: &'static str,
    }

    output.table(
        groups
            .into_iter()
            .map(|g| GroupRow {
                name: g.name,
                color: g.color.unwrap_or_default(),
                count: g.count,
                visible: if g.visible { "✓" } else { "✗" },
            })
            .collect(),
    );

    if let Some(points) = points {
        output.section("Points");

        #[derive(Tabled)]
        struct PointRow {
            #[tabled(rename = "A (x, y)")]
            a: String,
            #[tabled(rename = "B (x, y)")]
            b: String,
            #[tabled(rename = "Group")]
            group: String,
            #[tabled(rename = "Color")]
            color: String,
        }

        output.table(
            points
                .into_iter()
                .map(|p| PointRow {
                    a: format!("{}, {}", p.a[0], p.a[1]),
                    b: format!("{}, {}", p.b[0], p.b[1]),
                    group: p.group.unwrap_or_else(|| "-".to_string()),
                    color: p.display_color,
                })
                .collect(),
        );
    }

    Ok(())
}
