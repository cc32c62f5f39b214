//! Icon and glyph lookup.
//!
//! The display core never owns textures or fonts; hosts implement [`Atlas`]
//! over whatever sprite packing and font rendering they use. The interpreter
//! only needs regions, per-glyph metrics and the font's vertical
//! measurements. Lookups are total: `None` means "skip this draw", which the
//! protocol defines as the fallback for unknown icon ids and unmapped
//! character codes.

use std::collections::HashMap;

/// A rectangular slice of a backend texture page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRegion {
    /// Backend texture/page the region lives on.
    pub page: u32,
    /// Normalized texture coordinates, (u, v) to (u2, v2).
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
    /// Region size in pixels.
    pub width: f32,
    pub height: f32,
}

impl SpriteRegion {
    /// Width over height. Image draws fix their width to the requested size
    /// and derive the height from this, preserving the source aspect.
    /// Regions must be built with a positive height.
    pub fn ratio(&self) -> f32 {
        debug_assert!(self.height > 0.0, "sprite region height must be positive");
        self.width / self.height
    }
}

/// One renderable glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub region: SpriteRegion,
    /// Horizontal offset from the pen position to the quad.
    pub xoffset: f32,
    /// Vertical offset from the pen position to the quad.
    pub yoffset: f32,
    /// Pen advance to the next glyph.
    pub xadvance: f32,
}

/// Font-wide vertical metrics used to anchor glyphs.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub cap_height: f32,
    pub ascent: f32,
}

/// Icon and glyph source for a display's image and print commands.
pub trait Atlas {
    /// Region for an icon id, or `None` to skip the draw.
    fn icon(&self, id: i32) -> Option<SpriteRegion>;

    /// Glyph for a character code, or `None` to skip the draw.
    fn glyph(&self, code: i32) -> Option<Glyph>;

    fn metrics(&self) -> FontMetrics;
}

/// Atlas with no icons and no glyphs; every image and print is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyAtlas;

impl Atlas for EmptyAtlas {
    fn icon(&self, _id: i32) -> Option<SpriteRegion> {
        None
    }

    fn glyph(&self, _code: i32) -> Option<Glyph> {
        None
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics::default()
    }
}

/// In-memory atlas assembled entry by entry; used by tests and host tooling
/// that builds its tables up front.
#[derive(Debug, Default, Clone)]
pub struct TableAtlas {
    icons: HashMap<i32, SpriteRegion>,
    glyphs: HashMap<i32, Glyph>,
    metrics: FontMetrics,
}

impl TableAtlas {
    pub fn new(metrics: FontMetrics) -> Self {
        Self {
            icons: HashMap::new(),
            glyphs: HashMap::new(),
            metrics,
        }
    }

    pub fn insert_icon(&mut self, id: i32, region: SpriteRegion) {
        self.icons.insert(id, region);
    }

    pub fn insert_glyph(&mut self, c: char, glyph: Glyph) {
        self.glyphs.insert(c as i32, glyph);
    }
}

impl Atlas for TableAtlas {
    fn icon(&self, id: i32) -> Option<SpriteRegion> {
        self.icons.get(&id).copied()
    }

    fn glyph(&self, code: i32) -> Option<Glyph> {
        self.glyphs.get(&code).copied()
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(width: f32, height: f32) -> SpriteRegion {
        SpriteRegion {
            page: 0,
            u: 0.0,
            v: 0.0,
            u2: 1.0,
            v2: 1.0,
            width,
            height,
        }
    }

    #[test]
    fn ratio_is_width_over_height() {
        assert_eq!(region(32.0, 16.0).ratio(), 2.0);
        assert_eq!(region(8.0, 8.0).ratio(), 1.0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "sprite region height must be positive")]
    fn ratio_rejects_zero_height_regions() {
        region(8.0, 0.0).ratio();
    }

    #[test]
    fn table_atlas_resolves_what_it_holds() {
        let mut atlas = TableAtlas::new(FontMetrics {
            cap_height: 6.0,
            ascent: 2.0,
        });
        atlas.insert_icon(7, region(16.0, 16.0));
        atlas.insert_glyph(
            'A',
            Glyph {
                region: region(5.0, 7.0),
                xoffset: 0.0,
                yoffset: 0.0,
                xadvance: 6.0,
            },
        );

        assert!(atlas.icon(7).is_some());
        assert!(atlas.icon(8).is_none());
        assert!(atlas.glyph('A' as i32).is_some());
        assert!(atlas.glyph('B' as i32).is_none());
        assert_eq!(atlas.metrics().cap_height, 6.0);
    }

    #[test]
    fn empty_atlas_resolves_nothing() {
        assert!(EmptyAtlas.icon(0).is_none());
        assert!(EmptyAtlas.glyph('A' as i32).is_none());
    }
}
