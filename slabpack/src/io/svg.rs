use std::fmt::{Display, Formatter};

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::Document;
use svg::node::element::{Group, Line, Rectangle, Text, Title};

use crate::entities::{Placement, Slab};
use crate::geometry::Rect;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Write the label and size of every piece inside its footprint
    #[serde(default = "default_true")]
    pub labels: bool,
    ///Draw the kerf clearance around every piece
    #[serde(default)]
    pub kerf_outline: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            labels: true,
            kerf_outline: false,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub slab_fill: Color,
    pub piece_fill: Color,
    pub rotated_piece_fill: Color,
    pub kerf_stroke: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::STONE
    }
}

impl SvgLayoutTheme {
    pub const STONE: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        slab_fill: Color(0xD8, 0xD4, 0xCC),
        piece_fill: Color(0x8F, 0xA9, 0xC4),
        rotated_piece_fill: Color(0xC4, 0xA5, 0x8F),
        kerf_stroke: Color(0xD0, 0x00, 0x00),
    };
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(u8, u8, u8);

impl Color {
    pub fn parse(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            bail!("invalid color: {s}, expected #RRGGBB");
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Color(r, g, b))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Renders a single slab and its placed pieces
pub fn slab_to_svg(slab: &Slab, kerf: f64, options: SvgDrawOptions, title: &str) -> Document {
    let bbox = slab.bbox();
    let min_side = f64::min(bbox.width(), bbox.height());
    let margin = 0.05 * min_side;
    let vbox = bbox
        .resize_by(margin, 2.0 * margin)
        .expect("growing a valid rectangle keeps it valid");

    let theme = &options.theme;
    let stroke_width = min_side * 0.001 * theme.stroke_width_multiplier;
    let font_size = min_side * 0.035;

    let label = {
        //print some information above the top left corner of the slab
        let label_content = format!(
            "slab {} | {} | pieces: {} | efficiency: {:.1}% | {}",
            slab.idx + 1,
            slab.dims,
            slab.placements.len(),
            slab.efficiency(),
            title,
        );
        Text::new(label_content)
            .set("x", bbox.x_min)
            .set("y", bbox.y_min - 0.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let slab_group = Group::new()
        .set("id", format!("slab_{}", slab.idx))
        .add(rect_element(&bbox)
            .set("fill", format!("{}", theme.slab_fill))
            .set("stroke", "black")
            .set("stroke-width", 2.0 * stroke_width))
        .add(Title::new(format!(
            "slab {}, {}, efficiency: {:.3}%",
            slab.idx,
            slab.dims,
            slab.efficiency()
        )));

    let mut pieces_group = Group::new().set("id", "pieces");
    for placement in slab.placements.iter() {
        pieces_group = pieces_group.add(piece_group(placement, kerf, &options, stroke_width, font_size));
    }

    Document::new()
        .set(
            "viewBox",
            (vbox.x_min, vbox.y_min, vbox.width(), vbox.height()),
        )
        .add(slab_group)
        .add(pieces_group)
        .add(label)
}

fn piece_group(
    placement: &Placement,
    kerf: f64,
    options: &SvgDrawOptions,
    stroke_width: f64,
    font_size: f64,
) -> Group {
    let theme = &options.theme;
    let footprint = placement.footprint();
    let fill = match placement.rotated {
        true => theme.rotated_piece_fill,
        false => theme.piece_fill,
    };

    let mut group = Group::new()
        .set("id", format!("piece_{}", placement.piece.id))
        .add(rect_element(&footprint)
            .set("fill", format!("{fill}"))
            .set("stroke", "black")
            .set("stroke-width", stroke_width))
        .add(Title::new(format!(
            "{}, {} at ({:.3}, {:.3}){}",
            placement.piece.display_label(),
            placement.piece.dims,
            placement.x,
            placement.y,
            if placement.rotated { ", rotated" } else { "" }
        )));

    if options.kerf_outline && kerf > 0.0 {
        if let Some(clearance) = footprint.resize_by(kerf / 2.0, kerf / 2.0) {
            group = group.add(
                rect_element(&clearance)
                    .set("fill", "none")
                    .set("stroke", format!("{}", theme.kerf_stroke))
                    .set("stroke-width", 0.5 * stroke_width)
                    .set("stroke-dasharray", format!("{} {}", stroke_width, 2.0 * stroke_width)),
            );
        }
    }

    if placement.rotated {
        //diagonal marker for rotated pieces
        group = group.add(
            Line::new()
                .set("x1", footprint.x_min)
                .set("y1", footprint.y_min)
                .set("x2", footprint.x_max)
                .set("y2", footprint.y_max)
                .set("stroke", "black")
                .set("stroke-opacity", "0.3")
                .set("stroke-width", stroke_width),
        );
    }

    if options.labels {
        let size = f64::min(font_size, 0.2 * footprint.dims().min_side());
        let center = (
            (footprint.x_min + footprint.x_max) / 2.0,
            (footprint.y_min + footprint.y_max) / 2.0,
        );
        group = group.add(
            Text::new(format!(
                "{} ({})",
                placement.piece.display_label(),
                placement.piece.dims
            ))
            .set("x", center.0)
            .set("y", center.1)
            .set("font-size", size)
            .set("font-family", "monospace")
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle"),
        );
    }

    group
}

fn rect_element(rect: &Rect) -> Rectangle {
    Rectangle::new()
        .set("x", rect.x_min)
        .set("y", rect.y_min)
        .set("width", rect.width())
        .set("height", rect.height())
}
