use lot_graph::{GraphError, LotGraph, LotStanding};

/// One inventory line, e.g. `A001(0): E40*,E60*`.
///
/// Each lot renders as `E` (matched), `+` (held surplus) or `-` (open
/// deficit) followed by its quantity, with `*` marking source lots.
pub fn inventory_line(graph: &LotGraph, node: &str) -> String {
    let states: Vec<String> = graph
        .node_inventory(node)
        .iter()
        .map(|state| {
            let prefix = match state.standing {
                LotStanding::Matched => 'E',
                LotStanding::Surplus => '+',
                LotStanding::Deficit => '-',
            };
            let star = if state.from_source { "*" } else { "" };
            format!("{prefix}{}{star}", state.quantity)
        })
        .collect();
    format!("{node}({}): {}", graph.node_balance(node), states.join(","))
}

pub fn render_inventory(graph: &LotGraph) -> String {
    let mut out = String::new();
    for node in graph.node_names() {
        out.push_str(&inventory_line(graph, &node));
        out.push('\n');
    }
    out
}

/// Matched/unmatched provenance lines for `node`; empty when the node holds
/// nothing.
pub fn summary_lines(graph: &LotGraph, node: &str) -> Vec<String> {
    let summary = graph.provenance_summary(node);
    let mut lines = Vec::new();
    for (label, bucket) in [("matched", &summary.matched), ("unmatched", &summary.unmatched)] {
        if bucket.is_empty() {
            continue;
        }
        let parts: Vec<String> = bucket
            .iter()
            .map(|(origin, qty)| format!("{qty}({origin})"))
            .collect();
        lines.push(format!("{node}[{label}]: {}", parts.join(", ")));
    }
    lines
}

/// Origin trace lines for `node`, e.g. `40 : A009 <== A007 <== A004 <== A001*`.
pub fn path_lines(graph: &LotGraph, node: &str) -> Result<Vec<String>, GraphError> {
    let traces = graph.detailed_path(node)?;
    Ok(traces
        .into_iter()
        .map(|trace| {
            let mut path = trace.path;
            if trace.sourced {
                if let Some(origin) = path.last_mut() {
                    origin.push('*');
                }
            }
            format!("{} : {}", trace.quantity, path.join(" <== "))
        })
        .collect())
}
