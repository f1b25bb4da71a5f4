//! Deterministic default arrangement of the panel.

use crate::config::LayoutConfig;
use crate::geometry::Point;
use crate::instrument::{
    AirspeedIndicator, Altimeter, AttitudeIndicator, HeadingIndicator, Instrument,
    MagneticCompass, Mount, NdbIndicator, Radio, TurnCoordinator, VerticalSpeedIndicator,
    VorIndicator,
};
use crate::snapshot::keys;

/// Rows of `(key, cells spanned)`, top to bottom.
pub const ROWS: [&[(&str, usize)]; 2] = [
    &[
        (keys::AIRSPEED, 1),
        (keys::ATTITUDE, 1),
        (keys::ALTIMETER, 1),
        (keys::TURN_INDICATOR, 1),
        (keys::HEADING, 1),
        (keys::MAGNETIC_COMPASS, 1),
    ],
    &[(keys::VSI, 1), (keys::VOR, 1), (keys::NDB, 1), (keys::RADIO, 2)],
];

/// Builds the gauge registered under `key` in a cell whose top-left corner is
/// `cell` and which spans `span` cells. Unknown keys yield `None`.
pub fn instrument_for(key: &str, cell: Point, span: usize, config: &LayoutConfig) -> Option<Instrument> {
    let size = config.gauge_size;
    let center = Point::new(cell.x + size / 2.0, cell.y + size / 2.0);
    let circular = || Mount::circular(center, size, config.gauge_limits);
    let instrument: Instrument = match key {
        keys::AIRSPEED => AirspeedIndicator::new(circular()).into(),
        keys::ATTITUDE => AttitudeIndicator::new(circular()).into(),
        keys::ALTIMETER => Altimeter::new(circular()).into(),
        keys::TURN_INDICATOR => TurnCoordinator::new(circular()).into(),
        keys::HEADING => HeadingIndicator::new(circular()).into(),
        keys::MAGNETIC_COMPASS => MagneticCompass::new(circular()).into(),
        keys::VSI => VerticalSpeedIndicator::new(circular()).into(),
        keys::VOR => VorIndicator::new(circular()).into(),
        keys::NDB => NdbIndicator::new(circular()).into(),
        keys::RADIO => {
            let width = span as f64 * size + (span as f64 - 1.0) * config.padding;
            let height = size * config.radio_height_factor;
            let top_left = Point::new(cell.x, cell.y + (size - height) / 2.0);
            Radio::new(Mount::rectangular(top_left, width, height, config.radio_limits)).into()
        }
        _ => return None,
    };
    Some(instrument)
}

/// Every gauge of [`ROWS`], each row centered horizontally on the canvas.
pub fn default_panel(width: f64, height: f64, config: &LayoutConfig) -> Vec<(String, Instrument)> {
    let size = config.gauge_size;
    let pitch = size + config.padding;
    let top = height * config.top_fraction;

    let mut panel = Vec::new();
    for (row_index, row) in ROWS.iter().enumerate() {
        let cells: usize = row.iter().map(|(_, span)| span).sum();
        let row_width = cells as f64 * size + cells.saturating_sub(1) as f64 * config.padding;
        let y = top + row_index as f64 * pitch;
        let mut x = (width - row_width) / 2.0;
        for &(key, span) in row.iter() {
            if let Some(instrument) = instrument_for(key, Point::new(x, y), span, config) {
                panel.push((key.to_string(), instrument));
            }
            x += span as f64 * pitch;
        }
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Extent;

    #[test]
    fn first_row_is_centered() {
        let panel = default_panel(1200.0, 800.0, &LayoutConfig::default());
        let (key, airspeed) = &panel[0];
        assert_eq!(key, "airspeed");
        // 6 gauges and 5 gaps: 1060 wide, starting at 70
        assert_eq!(airspeed.mount().center(), Point::new(150.0, 520.0));
        let (_, compass) = &panel[5];
        assert_eq!(compass.mount().center(), Point::new(1050.0, 520.0));
    }

    #[test]
    fn radio_spans_two_cells() {
        let panel = default_panel(1200.0, 800.0, &LayoutConfig::default());
        let (key, radio) = panel.last().unwrap();
        assert_eq!(key, "radio");
        assert_eq!(
            radio.mount().extent(),
            Extent::Rect {
                width: 340.0,
                height: 128.0
            }
        );
    }

    #[test]
    fn gauges_do_not_overlap() {
        let panel = default_panel(1200.0, 800.0, &LayoutConfig::default());
        let boxes: Vec<_> = panel.iter().map(|(_, i)| i.mount().bounds()).collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                let apart = a.0 + a.2 <= b.0 || b.0 + b.2 <= a.0 || a.1 + a.3 <= b.1 || b.1 + b.3 <= a.1;
                assert!(apart, "{a:?} overlaps {b:?}");
            }
        }
    }
}
