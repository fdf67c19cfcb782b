//! Static terrain table consumed by presentation and the movement resolver.

use pixel_adventure_core::{TerrainClassifier, TerrainKind};

/// Edge length of a terrain frame in source pixels.
pub const TERRAIN_FRAME_SIZE: u32 = 32;

/// Rectangle within a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteFrame {
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Width in source pixels.
    pub width: u32,
    /// Height in source pixels.
    pub height: u32,
}

impl SpriteFrame {
    /// Square frame anchored at the sheet origin.
    #[must_use]
    pub const fn square(size: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size,
            height: size,
        }
    }
}

/// Presentation metadata for one terrain kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainSprite {
    /// Terrain kind described by the entry.
    pub kind: TerrainKind,
    /// Human readable name.
    pub name: &'static str,
    /// Image resource drawn for the terrain.
    pub src: &'static str,
    /// Frame cut from the image.
    pub frame: SpriteFrame,
    /// Whether the terrain blocks movement.
    pub collidable: bool,
    /// Glyph used by text frontends.
    pub glyph: char,
}

impl TerrainSprite {
    /// Stable identifier shared with configuration files.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.kind.id()
    }

    /// Label shown next to the sprite in terrain listings.
    #[must_use]
    pub const fn walkability_label(&self) -> &'static str {
        if self.collidable {
            "Not Walkable"
        } else {
            "Walkable"
        }
    }
}

static TERRAIN_SPRITES: [TerrainSprite; 4] = [
    TerrainSprite {
        kind: TerrainKind::Grass,
        name: "Grass",
        src: "/lovable-uploads/c53e139b-49b6-4bb4-92a7-f3c2e5a290f3.png",
        frame: SpriteFrame::square(TERRAIN_FRAME_SIZE),
        collidable: false,
        glyph: '.',
    },
    TerrainSprite {
        kind: TerrainKind::Water,
        name: "Water",
        src: "/lovable-uploads/5af0a10a-05dd-49fa-9807-2353f0a13a9e.png",
        frame: SpriteFrame::square(TERRAIN_FRAME_SIZE),
        collidable: true,
        glyph: '~',
    },
    TerrainSprite {
        kind: TerrainKind::Rock,
        name: "Rock",
        src: "/lovable-uploads/b5cd923f-31c5-4f89-9e33-d624fae71585.png",
        frame: SpriteFrame::square(TERRAIN_FRAME_SIZE),
        collidable: true,
        glyph: '#',
    },
    TerrainSprite {
        kind: TerrainKind::Ground,
        name: "Ground",
        src: "/lovable-uploads/9c37cff2-6351-40bc-8830-61e51700cee6.png",
        frame: SpriteFrame::square(TERRAIN_FRAME_SIZE),
        collidable: false,
        glyph: '_',
    },
];

/// Lookup table mapping terrain kinds to their presentation metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerrainCatalog;

impl TerrainCatalog {
    /// Every entry in catalog order.
    #[must_use]
    pub fn entries(&self) -> &'static [TerrainSprite] {
        &TERRAIN_SPRITES
    }

    /// Entry describing the provided terrain kind.
    #[must_use]
    pub fn sprite(&self, kind: TerrainKind) -> &'static TerrainSprite {
        self.by_id(kind.id())
    }

    /// Entry matching a string identifier; unknown identifiers resolve to the
    /// first entry.
    #[must_use]
    pub fn by_id(&self, id: &str) -> &'static TerrainSprite {
        TERRAIN_SPRITES
            .iter()
            .find(|sprite| sprite.id() == id)
            .unwrap_or(&TERRAIN_SPRITES[0])
    }
}

impl TerrainClassifier for TerrainCatalog {
    fn is_walkable(&self, kind: TerrainKind) -> bool {
        !self.sprite(kind).collidable
    }
}
