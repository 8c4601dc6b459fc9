//! Plain-text rendering of the client's view state

use ecoroute_client::{
    ComparisonView, Layer, MemoryMap, Notification, ResultsView, Suggestion,
};

pub fn suggestions(list: &[Suggestion]) -> String {
    list.iter()
        .enumerate()
        .map(|(i, s)| format!("  [{i}] {} {}\n", s.display_address, s.position))
        .collect()
}

fn layer_line(layer: &Layer) -> String {
    match layer {
        Layer::Polyline { points, style } => {
            let kind = if style.dash_array.is_some() { "normal (dashed)" } else { "eco (solid)" };
            format!("  route {kind}: {} points, weight {}\n", points.len(), style.weight)
        }
        Layer::Marker { position, icon } => {
            format!("  marker {}: {position}\n", icon.icon_class())
        }
    }
}

pub fn map(map: &MemoryMap) -> String {
    let mut out: String = map.layers().map(layer_line).collect();
    if let Some((b, padding)) = map.viewport() {
        out.push_str(&format!(
            "  viewport: S{:.4} W{:.4} N{:.4} E{:.4} (padding {padding}px)\n",
            b.south, b.west, b.north, b.east
        ));
    }
    out
}

pub fn results(view: &ResultsView) -> String {
    if !view.visible {
        return String::new();
    }
    let mut out = format!(
        "  Eco Route Distance: {}\n  Eco Route Duration: {}\n  CO2 Emissions:      {}\n",
        view.distance, view.duration, view.co2_emissions
    );
    if let Some(score) = &view.eco_score {
        out.push_str(&format!("  Eco Score:          {score}\n"));
    }
    out
}

pub fn comparison(view: &ComparisonView) -> String {
    if !view.visible {
        return String::new();
    }
    let marker = if view.penalty { " (slower)" } else { "" };
    format!(
        "  CO2 Saved:          {}\n  Time Difference:    {}{marker}\n",
        view.co2_saved, view.time_difference
    )
}

pub fn notification(n: &Notification) -> String {
    if !n.visible {
        return String::new();
    }
    format!("[{}] {}: {}\n", n.category, n.title, n.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute_client::{Bounds, Category, GeoPoint, MapSurface, MarkerIcon, NORMAL_LINE};

    #[test]
    fn test_hidden_panels_render_nothing() {
        assert!(results(&ResultsView::default()).is_empty());
        assert!(comparison(&ComparisonView::default()).is_empty());
        assert!(notification(&Notification::default()).is_empty());
    }

    #[test]
    fn test_comparison_marks_penalty() {
        let view = ComparisonView {
            co2_saved: "0.66 kg".to_string(),
            time_difference: "+5 min".to_string(),
            penalty: true,
            visible: true,
        };
        assert!(comparison(&view).contains("+5 min (slower)"));
    }

    #[test]
    fn test_notification_line() {
        let n = Notification {
            title: "Calculation Error".to_string(),
            message: "no route found".to_string(),
            category: Category::Error,
            visible: true,
        };
        assert_eq!(notification(&n), "[error] Calculation Error: no route found\n");
    }

    #[test]
    fn test_map_lists_layers_and_viewport() {
        let mut map = MemoryMap::new();
        assert!(super::map(&map).is_empty());

        let delhi = GeoPoint::new(28.6139, 77.209);
        let agra = GeoPoint::new(27.1767, 78.0081);
        map.add_layer(Layer::Marker { position: delhi, icon: MarkerIcon::Origin });
        map.add_layer(Layer::Polyline { points: vec![delhi, agra], style: NORMAL_LINE });
        map.fit_bounds(Bounds::from_points([&delhi, &agra]).unwrap(), 50);

        let text = super::map(&map);
        assert!(text.contains("  marker fa-map-marker-alt: (28.61390, 77.20900)\n"));
        assert!(text.contains("  route normal (dashed): 2 points, weight 4\n"));
        assert!(text.ends_with("(padding 50px)\n"));
    }

    #[test]
    fn test_suggestion_lines() {
        let list = vec![Suggestion {
            display_address: "Chandigarh".to_string(),
            position: GeoPoint::new(30.7333, 76.7794),
        }];
        assert_eq!(suggestions(&list), "  [0] Chandigarh (30.73330, 76.77940)\n");
    }
}
