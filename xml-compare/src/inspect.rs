use xml_compare_core::{ElementStart, NodeEvent};

/// Render a node event stream, indented by element depth.
pub fn render_events(events: &[NodeEvent]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;

    for event in events {
        if matches!(event, NodeEvent::ElementEnd) {
            depth = depth.saturating_sub(1);
        }
        let indent = "  ".repeat(depth);
        let line = match event {
            NodeEvent::ElementStart(start) => render_start(start),
            NodeEvent::ElementEnd => "end".to_string(),
            NodeEvent::Text(text) => format!("text {text:?}"),
            NodeEvent::Declaration => "declaration".to_string(),
            NodeEvent::Other => "other".to_string(),
        };
        out.push_str(&format!("{indent}{line}\n"));

        if let NodeEvent::ElementStart(start) = event {
            if !start.is_empty {
                depth += 1;
            }
        }
    }
    out
}

fn render_start(start: &ElementStart) -> String {
    let mut line = format!("element {}", start.name);
    if let Some(ns) = &start.namespace_uri {
        line.push_str(&format!(" {{{ns}}}"));
    }
    for attr in &start.attributes {
        line.push_str(&format!(" {}={:?}", attr.name, attr.value));
    }
    if start.is_empty {
        line.push_str(" (empty)");
    }
    line
}
