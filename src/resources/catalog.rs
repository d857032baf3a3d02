//! The resource catalog: one record per asset the game loads.
//!
//! The catalog is plain data. It is normally read from `assets/manifest.ron`, and
//! [`Catalog::battleship`] builds the table the game ships with. The loading
//! sequencer only iterates it grouped by kind; it never names an asset itself.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::AssetError, resources::ResourceKind};

/// Number of ship lengths that get a horizontal and a vertical deployment image.
pub const SHIP_SIZES: u32 = 5;

/// One asset: which registry it goes into, under which name, from which file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub kind: ResourceKind,
    pub name: String,
    pub file: String,
    /// Point size, required for fonts and ignored otherwise.
    #[serde(default)]
    pub size: Option<u32>,
    /// Colour key for images: pixels of exactly this RGB value become transparent.
    #[serde(default)]
    pub transparent: Option<[u8; 3]>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Read and parse a RON manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_ron_str(&text).map_err(|source| AssetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "catalog {} lists {} asset(s)",
            path.display(),
            catalog.records.len()
        );
        Ok(catalog)
    }

    pub fn push(&mut self, record: CatalogRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    pub fn font(&mut self, name: impl Into<String>, file: impl Into<String>, size: u32) -> &mut Self {
        self.push(CatalogRecord {
            kind: ResourceKind::Font,
            name: name.into(),
            file: file.into(),
            size: Some(size),
            transparent: None,
        })
    }

    pub fn image(&mut self, name: impl Into<String>, file: impl Into<String>) -> &mut Self {
        self.push(CatalogRecord {
            kind: ResourceKind::Image,
            name: name.into(),
            file: file.into(),
            size: None,
            transparent: None,
        })
    }

    /// An image whose `key` colour is rendered transparent.
    pub fn transparent_image(
        &mut self,
        name: impl Into<String>,
        file: impl Into<String>,
        key: [u8; 3],
    ) -> &mut Self {
        self.push(CatalogRecord {
            kind: ResourceKind::Image,
            name: name.into(),
            file: file.into(),
            size: None,
            transparent: Some(key),
        })
    }

    pub fn sound(&mut self, name: impl Into<String>, file: impl Into<String>) -> &mut Self {
        self.push(CatalogRecord {
            kind: ResourceKind::Sound,
            name: name.into(),
            file: file.into(),
            size: None,
            transparent: None,
        })
    }

    pub fn music(&mut self, name: impl Into<String>, file: impl Into<String>) -> &mut Self {
        self.push(CatalogRecord {
            kind: ResourceKind::Music,
            name: name.into(),
            file: file.into(),
            size: None,
            transparent: None,
        })
    }

    /// Records of one kind, in catalog order.
    pub fn records_of(&self, kind: ResourceKind) -> impl Iterator<Item = &CatalogRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.records_of(kind).count()
    }

    /// Reject records that can never load before any file is touched.
    ///
    /// Duplicate names within one kind are reported as
    /// [`AssetError::DuplicateKey`], the same error registration would raise.
    pub fn validate(&self) -> Result<(), AssetError> {
        let mut seen: HashSet<(ResourceKind, &str)> = HashSet::new();
        for record in &self.records {
            if record.name.is_empty() {
                return Err(AssetError::InvalidCatalog(format!(
                    "{} record for `{}` has no name",
                    record.kind, record.file
                )));
            }
            if record.file.is_empty() {
                return Err(AssetError::InvalidCatalog(format!(
                    "{} `{}` has no file name",
                    record.kind, record.name
                )));
            }
            if record.kind == ResourceKind::Font && record.size.is_none() {
                return Err(AssetError::InvalidCatalog(format!(
                    "font `{}` has no size",
                    record.name
                )));
            }
            if !seen.insert((record.kind, record.name.as_str())) {
                return Err(AssetError::DuplicateKey {
                    kind: record.kind,
                    name: record.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The asset table the battleship game ships with.
    pub fn battleship() -> Self {
        let mut catalog = Catalog::new();

        catalog
            .font("ArialLarge", "arial.ttf", 80)
            .font("Courier", "cour.ttf", 14)
            .font("CourierSmall", "cour.ttf", 8)
            .font("Menu", "ffaccess.ttf", 9)
            .font("GameMenu", "ffaccess.ttf", 10)
            .font("Scores", "ffaccess.ttf", 12);

        // buttons and backgrounds
        catalog
            .image("Back", "back-icon.png")
            .image("Menu", "main_menu.jpg")
            .image("Discovery", "discover.jpg")
            .image("Deploy", "deploy.jpg")
            .image("EndScore", "enddetailsback.jpg")
            .image("LeftRightButton", "deploy_dir_button_horiz.png")
            .image("UpDownButton", "deploy_dir_button_vert.png")
            .image("SelectedShip", "deploy_button_hl.png")
            .image("PlayButton", "deploy_play_button.png")
            .image("RandomButton", "deploy_randomize_button.png");
        for size in 1..=SHIP_SIZES {
            catalog
                .image(format!("ShipLR{size}"), format!("ship_deploy_horiz_{size}.png"))
                .image(format!("ShipUD{size}"), format!("ship_deploy_vert_{size}.png"));
        }
        catalog
            .image("Explosion", "explosion.png")
            .image("Splash", "splash.png");

        catalog
            .sound("Error", "error.wav")
            .sound("Hit", "hit.wav")
            .sound("Sink", "sink2.wav")
            .sound("Siren", "siren.wav")
            .sound("Miss", "watershot.wav")
            .sound("Winner", "winner.wav")
            .sound("Lose", "lose.wav")
            .sound("Easy", "easy.wav")
            .sound("Medium", "medium.wav")
            .sound("Hard", "hard.wav")
            .sound("Insane", "insane.wav");

        catalog.music("Background", "mainMenuMusic.mp3");
        catalog
    }
}
