//! Ring layout: which category goes on which radius, with what stroke, and
//! where the track, tick marks and label sit.

use crate::config::{ArcStyleConfig, CanvasConfig};
use crate::error::GaugeError;
use crate::theme::{self, ColorTable};
use derive_more::Deref;
use ringdraw::{Color, PathDescription, Point, TextStyle, TickRing, arc_path, tick_positions};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::BTreeMap;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

pub const CATEGORY_COUNT: usize = 5;
/// Every score is a share of this arc span.
pub const MAX_SCORE: f64 = 100.0;

pub const OUTER_TICK_COMPENSATION: f64 = 2.0;
pub const INNER_TICK_COMPENSATION: f64 = 3.0;
const OUTER_TICK_EXTRA_DENSITY: usize = 30;
const INNER_TICK_INSET_TRACKS: f64 = 2.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lifestyle,
    Mental,
    Physical,
    Nutrition,
    Total,
}

impl Category {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn is_total(&self) -> bool {
        *self == Category::Total
    }
}

/// Draw order of the rings. Always a permutation of every [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct CategoryOrder(Vec<Category>);

impl Default for CategoryOrder {
    fn default() -> Self {
        Self(Category::iter().collect())
    }
}

impl CategoryOrder {
    pub fn new(order: Vec<Category>) -> Result<Self, GaugeError> {
        if order.len() != CATEGORY_COUNT || Category::iter().any(|c| !order.contains(&c)) {
            return Err(GaugeError::invalid_config(format!(
                "category order must name each category exactly once, got {order:?}"
            )));
        }
        Ok(Self(order))
    }
}

/// One score per category, each within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ScorePayload {
    values: [f64; CATEGORY_COUNT],
}

impl ScorePayload {
    pub fn new(
        lifestyle: f64,
        mental: f64,
        physical: f64,
        nutrition: f64,
        total: f64,
    ) -> Result<Self, GaugeError> {
        Self::from_values([lifestyle, mental, physical, nutrition, total])
    }

    fn from_values(values: [f64; CATEGORY_COUNT]) -> Result<Self, GaugeError> {
        for category in Category::iter() {
            check_score(category, values[category.as_index()])?;
        }
        Ok(Self { values })
    }

    /// Builds a payload from `(name, score)` pairs. Every category must
    /// appear exactly once; names are matched case-insensitively.
    pub fn from_pairs<K: AsRef<str>>(
        pairs: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self, GaugeError> {
        let mut slots = [None; CATEGORY_COUNT];

        for (key, value) in pairs {
            let key = key.as_ref();
            let category: Category = key
                .parse()
                .map_err(|_| GaugeError::invalid_score(format!("unknown category '{key}'")))?;
            let slot = &mut slots[category.as_index()];
            if slot.is_some() {
                return Err(GaugeError::invalid_score(format!(
                    "'{category}' score given more than once"
                )));
            }
            *slot = Some(value);
        }

        let mut values = [0.0; CATEGORY_COUNT];
        for category in Category::iter() {
            values[category.as_index()] = slots[category.as_index()]
                .ok_or_else(|| GaugeError::invalid_score(format!("missing '{category}' score")))?;
        }
        Self::from_values(values)
    }

    pub fn get(&self, category: Category) -> f64 {
        self.values[category.as_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::iter().map(|c| (c, self.get(c)))
    }
}

fn check_score(category: Category, value: f64) -> Result<(), GaugeError> {
    if !value.is_finite() {
        return Err(GaugeError::invalid_score(format!(
            "'{category}' score is not a finite number"
        )));
    }
    if !(0.0..=MAX_SCORE).contains(&value) {
        return Err(GaugeError::invalid_score(format!(
            "'{category}' score {value} is outside 0..={MAX_SCORE}"
        )));
    }
    Ok(())
}

impl TryFrom<BTreeMap<String, f64>> for ScorePayload {
    type Error = GaugeError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<ScorePayload> for BTreeMap<String, f64> {
    fn from(payload: ScorePayload) -> Self {
        payload.iter().map(|(c, v)| (c.to_string(), v)).collect()
    }
}

/// Drop shadow for a category ring: the same arc, shifted sideways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowSpec {
    pub offset_x: f64,
    pub draw_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub category: Category,
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub draw_value: f64,
    pub radius: f64,
    pub glow: Option<GlowSpec>,
}

impl RingSpec {
    pub fn has_glow(&self) -> bool {
        self.glow.is_some()
    }

    pub fn path(&self, center: Point) -> PathDescription {
        arc_path(center, self.draw_value, MAX_SCORE, self.radius)
    }

    /// `None` when there is no glow or it would sweep nothing.
    pub fn glow_path(&self, center: Point) -> Option<PathDescription> {
        self.glow
            .filter(|glow| glow.draw_value > 0.0)
            .map(|glow| {
                arc_path(
                    center.offset(glow.offset_x, 0.0),
                    glow.draw_value,
                    MAX_SCORE,
                    self.radius,
                )
            })
    }
}

/// A zero score still gets a one-unit sliver so every ring stays visible.
fn visible_value(score: f64) -> f64 {
    if score == 0.0 { 1.0 } else { score }
}

fn glow_value(score: f64) -> f64 {
    if score == 0.0 { 0.0 } else { score - 1.0 }
}

/// Lays out one ring per category in `order`.
///
/// Inner rings start at `inner_arc_radius` and step inward by `decrease_by`
/// in draw order; the total ring always sits on `total_arc_radius`.
pub fn plan(
    payload: &ScorePayload,
    style: &ArcStyleConfig,
    order: &CategoryOrder,
    colors: &ColorTable,
) -> Vec<RingSpec> {
    let mut running_radius = style.inner_arc_radius;

    order
        .iter()
        .map(|&category| {
            let score = payload.get(category);
            let stroke_color = colors.category(category);

            if category.is_total() {
                return RingSpec {
                    category,
                    stroke_color,
                    stroke_width: style.total_arc_width,
                    draw_value: score,
                    radius: style.total_arc_radius,
                    glow: None,
                };
            }

            let radius = running_radius;
            running_radius -= style.decrease_by;
            if radius <= style.inner_arc_width / 2.0 {
                log::warn!("'{category}' ring radius {radius} collapses into the centre");
            }

            RingSpec {
                category,
                stroke_color,
                stroke_width: style.inner_arc_width,
                draw_value: visible_value(score),
                radius,
                glow: Some(GlowSpec {
                    offset_x: style.glow_offset,
                    draw_value: glow_value(score),
                }),
            }
        })
        .collect()
}

/// Rejects styles whose innermost ring or inner tick ring would reach the
/// centre of the canvas.
pub fn check_geometry(style: &ArcStyleConfig, order: &CategoryOrder) -> Result<(), GaugeError> {
    let inner_rings = order.iter().filter(|c| !c.is_total()).count();
    let innermost =
        style.inner_arc_radius - inner_rings.saturating_sub(1) as f64 * style.decrease_by;
    if innermost <= style.inner_arc_width / 2.0 {
        return Err(GaugeError::invalid_config(format!(
            "innermost ring radius {innermost} does not clear half the ring width ({})",
            style.inner_arc_width / 2.0
        )));
    }

    let inner_ticks = style.total_arc_radius - INNER_TICK_INSET_TRACKS * style.track_width;
    if inner_ticks <= 0.0 {
        return Err(GaugeError::invalid_config(format!(
            "inner tick radius {inner_ticks} is not positive"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSpec {
    pub radius: f64,
    pub width: f64,
    pub color: Color,
}

impl TrackSpec {
    pub fn path(&self, center: Point) -> PathDescription {
        arc_path(center, MAX_SCORE, MAX_SCORE, self.radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSpec {
    pub ring: TickRing,
    pub dot_radius: f64,
    pub color: Color,
}

fn tick_spec(
    center: Point,
    radius: f64,
    density: usize,
    compensation: f64,
    dot_radius: f64,
) -> TickSpec {
    let ring = tick_positions(center, radius, density, compensation);
    TickSpec {
        ring,
        dot_radius,
        color: theme::tick_color(ring.radius()),
    }
}

/// The outer ring of marks just outside the track, and the inner one two
/// track widths inside it. `compensation` replaces both default offsets.
pub fn plan_ticks(
    center: Point,
    style: &ArcStyleConfig,
    compensation: Option<f64>,
) -> [TickSpec; 2] {
    let density = style.total_arc_radius.round().max(0.0) as usize;

    [
        tick_spec(
            center,
            style.total_arc_radius + style.tick_offset,
            density + OUTER_TICK_EXTRA_DENSITY,
            compensation.unwrap_or(OUTER_TICK_COMPENSATION),
            style.tick_dot_radius,
        ),
        tick_spec(
            center,
            style.total_arc_radius - INNER_TICK_INSET_TRACKS * style.track_width,
            density,
            compensation.unwrap_or(INNER_TICK_COMPENSATION),
            style.tick_dot_radius,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub value: f64,
    pub position: Point,
    pub style: TextStyle,
}

impl LabelSpec {
    pub fn text(&self) -> String {
        format!("{}", self.value.round() as i64)
    }
}

/// Everything one draw pass emits, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeLayout {
    pub size: f64,
    pub center: Point,
    pub track: TrackSpec,
    pub ticks: [TickSpec; 2],
    pub rings: Vec<RingSpec>,
    pub label: LabelSpec,
}

impl GaugeLayout {
    pub fn build(
        canvas: &CanvasConfig,
        style: &ArcStyleConfig,
        payload: &ScorePayload,
        order: &CategoryOrder,
        colors: &ColorTable,
        compensation: Option<f64>,
    ) -> Self {
        let center = canvas.center();

        Self {
            size: canvas.size,
            center,
            track: TrackSpec {
                radius: style.total_arc_radius,
                width: style.track_width,
                color: colors.track,
            },
            ticks: plan_ticks(center, style, compensation),
            rings: plan(payload, style, order, colors),
            label: LabelSpec {
                value: payload.get(Category::Total),
                position: center,
                style: TextStyle {
                    font_size: style.label_size,
                    color: colors.label,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ScorePayload {
        ScorePayload::from_pairs([
            ("nutrition", 33.0),
            ("physical", 0.0),
            ("lifestyle", 0.0),
            ("mental", 0.0),
            ("total", 25.0),
        ])
        .unwrap()
    }

    fn ring(rings: &[RingSpec], category: Category) -> RingSpec {
        *rings.iter().find(|r| r.category == category).unwrap()
    }

    #[test]
    fn test_category_parsing() {
        let cases = vec![
            ("\"lifestyle\"", Category::Lifestyle),
            ("\"Mental\"", Category::Mental),
            ("\"PHYSICAL\"", Category::Physical),
            ("\"nutrition\"", Category::Nutrition),
            ("\"total\"", Category::Total),
        ];

        for (json, expected) in cases {
            let deserialized: Category = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Category>("\"sleep\"").is_err());
    }

    #[test]
    fn test_zero_scores_become_slivers() {
        let rings = plan(
            &payload(),
            &ArcStyleConfig::default(),
            &CategoryOrder::default(),
            &ColorTable::default(),
        );

        assert_eq!(rings.len(), CATEGORY_COUNT);
        assert_eq!(ring(&rings, Category::Physical).draw_value, 1.0);
        assert_eq!(ring(&rings, Category::Lifestyle).draw_value, 1.0);
        assert_eq!(ring(&rings, Category::Mental).draw_value, 1.0);
        assert_eq!(ring(&rings, Category::Nutrition).draw_value, 33.0);
        assert_eq!(ring(&rings, Category::Total).draw_value, 25.0);
    }

    #[test]
    fn test_inner_radii_step_inward_in_draw_order() {
        let style = ArcStyleConfig::default();
        let rings = plan(
            &payload(),
            &style,
            &CategoryOrder::default(),
            &ColorTable::default(),
        );

        let radii: Vec<f64> = rings
            .iter()
            .filter(|r| !r.category.is_total())
            .map(|r| r.radius)
            .collect();
        assert_eq!(radii, vec![105.0, 88.0, 71.0, 54.0]);
        assert!(radii.windows(2).all(|w| w[0] > w[1]));

        let total = ring(&rings, Category::Total);
        assert_eq!(total.radius, style.total_arc_radius);
        assert_eq!(total.stroke_width, style.total_arc_width);
        assert!(!total.has_glow());
    }

    #[test]
    fn test_total_radius_ignores_its_position_in_order() {
        let order = CategoryOrder::new(vec![
            Category::Total,
            Category::Nutrition,
            Category::Physical,
            Category::Mental,
            Category::Lifestyle,
        ])
        .unwrap();
        let style = ArcStyleConfig::default();
        let rings = plan(&payload(), &style, &order, &ColorTable::default());

        assert_eq!(rings[0].category, Category::Total);
        assert_eq!(rings[0].radius, style.total_arc_radius);
        assert_eq!(ring(&rings, Category::Nutrition).radius, 105.0);
        assert_eq!(ring(&rings, Category::Lifestyle).radius, 54.0);
    }

    #[test]
    fn test_glow_uses_original_score() {
        let payload = ScorePayload::new(0.0, 60.0, 1.0, 33.0, 25.0).unwrap();
        let style = ArcStyleConfig::default();
        let rings = plan(
            &payload,
            &style,
            &CategoryOrder::default(),
            &ColorTable::default(),
        );
        let center = Point::new(150.0, 150.0);

        let lifestyle = ring(&rings, Category::Lifestyle);
        assert_eq!(lifestyle.glow.unwrap().draw_value, 0.0);
        assert!(lifestyle.glow_path(center).is_none());

        let mental = ring(&rings, Category::Mental);
        let glow = mental.glow.unwrap();
        assert_eq!(glow.draw_value, 59.0);
        assert_eq!(glow.offset_x, style.glow_offset);
        let path = mental.glow_path(center).unwrap();
        assert_eq!(path.center, Point::new(154.0, 150.0));
        assert_eq!(path.radius, mental.radius);

        assert!(ring(&rings, Category::Physical).glow_path(center).is_none());
    }

    #[test]
    fn test_payload_validation() {
        let cases = vec![
            vec![("lifestyle", 1.0), ("mental", 1.0), ("physical", 1.0), ("nutrition", 1.0)],
            vec![
                ("lifestyle", 1.0),
                ("mental", 1.0),
                ("physical", 1.0),
                ("nutrition", 1.0),
                ("total", 101.0),
            ],
            vec![
                ("lifestyle", -1.0),
                ("mental", 1.0),
                ("physical", 1.0),
                ("nutrition", 1.0),
                ("total", 1.0),
            ],
            vec![
                ("lifestyle", 1.0),
                ("mental", f64::NAN),
                ("physical", 1.0),
                ("nutrition", 1.0),
                ("total", 1.0),
            ],
            vec![
                ("lifestyle", 1.0),
                ("mental", 1.0),
                ("physical", 1.0),
                ("nutrition", 1.0),
                ("total", 1.0),
                ("sleep", 1.0),
            ],
            vec![
                ("lifestyle", 1.0),
                ("Lifestyle", 2.0),
                ("mental", 1.0),
                ("physical", 1.0),
                ("nutrition", 1.0),
                ("total", 1.0),
            ],
        ];

        for pairs in cases {
            assert!(matches!(
                ScorePayload::from_pairs(pairs),
                Err(GaugeError::InvalidScoreData { .. })
            ));
        }
    }

    #[test]
    fn test_payload_serde() {
        let payload: ScorePayload = serde_json::from_str(
            r#"{"lifestyle": 10, "mental": 20.5, "physical": 30, "nutrition": 40, "total": 50}"#,
        )
        .unwrap();
        assert_eq!(payload.get(Category::Mental), 20.5);
        assert_eq!(payload.get(Category::Total), 50.0);

        let json = serde_json::to_value(payload).unwrap();
        assert_eq!(json["nutrition"], 40.0);

        assert!(serde_json::from_str::<ScorePayload>(r#"{"lifestyle": 10}"#).is_err());
    }

    #[test]
    fn test_order_must_be_a_permutation() {
        let cases = vec![
            vec![],
            vec![
                Category::Lifestyle,
                Category::Lifestyle,
                Category::Physical,
                Category::Nutrition,
                Category::Total,
            ],
            vec![
                Category::Lifestyle,
                Category::Mental,
                Category::Physical,
                Category::Nutrition,
            ],
        ];

        for order in cases {
            assert!(matches!(
                CategoryOrder::new(order),
                Err(GaugeError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_tick_rings() {
        let style = ArcStyleConfig::default();
        let center = Point::new(150.0, 150.0);

        let [outer, inner] = plan_ticks(center, &style, None);
        assert_eq!(outer.ring.len(), 158);
        assert_eq!(outer.ring.radius(), 128.0 + 14.0 + OUTER_TICK_COMPENSATION);
        assert_eq!(inner.ring.len(), 128);
        assert_eq!(inner.ring.radius(), 128.0 - 36.0 + INNER_TICK_COMPENSATION);

        let [outer, inner] = plan_ticks(center, &style, Some(0.0));
        assert_eq!(outer.ring.radius(), 142.0);
        assert_eq!(inner.ring.radius(), 92.0);
    }

    #[test]
    fn test_geometry_must_stay_outside_the_centre() {
        let order = CategoryOrder::default();
        assert!(check_geometry(&ArcStyleConfig::default(), &order).is_ok());
        assert!(
            check_geometry(
                &ArcStyleConfig {
                    decrease_by: 33.0,
                    ..Default::default()
                },
                &order
            )
            .is_ok()
        );

        let cases = vec![
            // innermost ring at 105 - 3 * 40 = -15
            ArcStyleConfig {
                decrease_by: 40.0,
                ..Default::default()
            },
            // innermost ring at 4, exactly half the stroke width
            ArcStyleConfig {
                decrease_by: 33.0,
                inner_arc_width: 8.0,
                inner_arc_radius: 103.0,
                ..Default::default()
            },
            // inner ticks at 128 - 2 * 70 = -12
            ArcStyleConfig {
                track_width: 70.0,
                ..Default::default()
            },
        ];

        for style in cases {
            assert!(matches!(
                check_geometry(&style, &order),
                Err(GaugeError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_layout_label_and_track() {
        let canvas = CanvasConfig::new("gauge");
        let layout = GaugeLayout::build(
            &canvas,
            &ArcStyleConfig::default(),
            &ScorePayload::new(1.0, 2.0, 3.0, 4.0, 72.6).unwrap(),
            &CategoryOrder::default(),
            &ColorTable::default(),
            None,
        );

        assert_eq!(layout.label.text(), "73");
        assert_eq!(layout.label.position, Point::new(150.0, 150.0));
        assert!(layout.track.path(layout.center).is_full_circle());
        assert_eq!(layout.rings.len(), CATEGORY_COUNT);
    }
}
