//! Package writer: assembles every part into a deflated zip archive.
//!
//! Part layout:
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/core.xml, docProps/app.xml
//! ppt/presentation.xml (+ _rels)
//! ppt/presProps.xml, ppt/viewProps.xml, ppt/tableStyles.xml
//! ppt/slideMasters/slideMaster1.xml (+ _rels)
//! ppt/slideLayouts/slideLayout1.xml (+ _rels)
//! ppt/theme/theme1.xml
//! ppt/slides/slide{n}.xml (+ _rels), n = 1..=slide_count
//! ```

use std::collections::HashMap;
use std::io::{Seek, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::deck::Deck;
use crate::errors::{DeckError, Result};
use crate::pptx::parts::{
    app_props_xml, core_props_xml, ct, presentation_xml, rt, ContentTypes, Relationships,
};
use crate::pptx::slide::slide_xml;
use crate::pptx::template;

pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Zip entry name of the `n`-th slide (1-based).
pub fn slide_part(n: usize) -> String {
    format!("ppt/slides/slide{n}.xml")
}

/// Relationship part name for a part, e.g. `ppt/slides/_rels/slide1.xml.rels`.
pub fn rels_part(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: FileOptions,
    content_types: ContentTypes,
    /// Parts in write order; `[Content_Types].xml` is written first at finish.
    parts: Vec<(String, Vec<u8>)>,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
            content_types: ContentTypes::new(),
            parts: Vec::new(),
        }
    }

    /// Queues a part that needs a content-type override.
    fn part(&mut self, name: &str, content_type: &'static str, data: impl Into<Vec<u8>>) {
        self.content_types.add(name, content_type);
        self.parts.push((name.to_string(), data.into()));
    }

    /// Queues a relationship part (covered by the `rels` default).
    fn rels(&mut self, owner: &str, rels: &Relationships) -> Result<()> {
        self.parts.push((rels_part(owner), rels.to_xml()?.into_bytes()));
        Ok(())
    }

    fn finish(mut self) -> Result<W> {
        self.zip.start_file("[Content_Types].xml", self.options)?;
        self.zip.write_all(self.content_types.to_xml()?.as_bytes())?;
        for (name, data) in &self.parts {
            self.zip.start_file(name.as_str(), self.options)?;
            self.zip.write_all(data)?;
        }
        Ok(self.zip.finish()?)
    }
}

/// Writes `deck` as a `.pptx` package into `writer`.
pub fn write_package<W: Write + Seek>(
    deck: &Deck,
    writer: W,
    title: &str,
    created: DateTime<Utc>,
) -> Result<W> {
    let mut pkg = PackageWriter::new(writer);

    // Package-level relationships.
    let mut root_rels = Relationships::new();
    root_rels.add(rt::OFFICE_DOCUMENT, PRESENTATION_PART);
    root_rels.add(rt::CORE_PROPS, "docProps/core.xml");
    root_rels.add(rt::APP_PROPS, "docProps/app.xml");
    pkg.parts
        .push(("_rels/.rels".to_string(), root_rels.to_xml()?.into_bytes()));
    pkg.part("docProps/core.xml", ct::CORE_PROPS, core_props_xml(title, created)?);
    pkg.part("docProps/app.xml", ct::APP_PROPS, app_props_xml(deck.slide_count())?);

    // Presentation and its relationships.
    let mut pres_rels = Relationships::new();
    let master_rel = pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    pres_rels.add(rt::THEME, "theme/theme1.xml");
    pres_rels.add(rt::PRES_PROPS, "presProps.xml");
    pres_rels.add(rt::VIEW_PROPS, "viewProps.xml");
    pres_rels.add(rt::TABLE_STYLES, "tableStyles.xml");
    let slide_rels: Vec<String> = (1..=deck.slide_count())
        .map(|n| pres_rels.add(rt::SLIDE, format!("slides/slide{n}.xml")))
        .collect();

    pkg.part(
        PRESENTATION_PART,
        ct::PRESENTATION,
        presentation_xml(&deck.geometry, &master_rel, &slide_rels)?,
    );
    pkg.rels(PRESENTATION_PART, &pres_rels)?;
    pkg.part("ppt/presProps.xml", ct::PRES_PROPS, template::PRES_PROPS_XML);
    pkg.part("ppt/viewProps.xml", ct::VIEW_PROPS, template::VIEW_PROPS_XML);
    pkg.part("ppt/tableStyles.xml", ct::TABLE_STYLES, template::TABLE_STYLES_XML);

    // Master, layout, theme.
    let master_part = "ppt/slideMasters/slideMaster1.xml";
    let layout_part = "ppt/slideLayouts/slideLayout1.xml";
    pkg.part(master_part, ct::SLIDE_MASTER, template::SLIDE_MASTER_XML);
    let mut master_rels = Relationships::new();
    master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(rt::THEME, "../theme/theme1.xml");
    pkg.rels(master_part, &master_rels)?;

    pkg.part(layout_part, ct::SLIDE_LAYOUT, template::SLIDE_LAYOUT_XML);
    let mut layout_rels = Relationships::new();
    layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    pkg.rels(layout_part, &layout_rels)?;

    pkg.part("ppt/theme/theme1.xml", ct::THEME, template::THEME_XML);

    // Slides.
    for (idx, slide) in deck.slides.iter().enumerate() {
        let part = slide_part(idx + 1);
        let mut rels = Relationships::new();
        rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

        let mut link_rels: HashMap<usize, String> = HashMap::new();
        for target in slide.link_targets() {
            if target >= deck.slide_count() {
                debug!(slide = idx + 1, to = target + 1, "Dropping link to a slide outside the deck");
                continue;
            }
            let rel_id = rels.add(rt::SLIDE, format!("slide{}.xml", target + 1));
            link_rels.insert(target, rel_id);
        }

        pkg.part(&part, ct::SLIDE, slide_xml(slide, &link_rels)?);
        pkg.rels(&part, &rels)?;
    }

    pkg.finish()
}

/// Writes the package next to `path` and atomically moves it into place.
pub fn save(deck: &Deck, path: &Path, title: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".txtdeck-")
        .suffix(".pptx.tmp")
        .tempfile_in(dir)?;
    write_package(deck, tmp.as_file_mut(), title, Utc::now())?;
    tmp.as_file_mut().flush()?;

    tmp.persist(path).map_err(|e| DeckError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(path = %path.display(), slides = deck.slide_count(), "Presentation saved");
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
