//! Slide part rendering.
//!
//! A slide is a solid background plus a single text-box shape. Paragraph text
//! is split on `'\n'` into runs separated by `a:br`, so multi-line paragraphs
//! keep their line breaks. Every run and break carries the full character
//! formatting, since a blank layout gives nothing to inherit.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

use crate::deck::{Align, Anchor, Paragraph, Slide, TextStyle};
use crate::errors::Result;
use crate::pptx::parts::{escape_xml, NS_A, NS_P, NS_R, XML_DECL};

/// Language tag written on every run.
const RUN_LANG: &str = "ko-KR";

/// `sz` bounds in hundredths of a point.
const MIN_SZ: u64 = 100;
const MAX_SZ: u64 = 400_000;

/// Renders `ppt/slides/slideN.xml`.
///
/// `link_rels` maps a target slide index to the relationship id in this
/// slide's `.rels` part. A paragraph whose target has no entry is written
/// without a hyperlink.
pub fn slide_xml(slide: &Slide, link_rels: &HashMap<usize, String>) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld>"#
    )?;

    write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        slide.background.hex()
    )?;

    xml.push_str("<p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);
    write_text_box(&mut xml, slide, link_rels)?;
    xml.push_str("</p:spTree>");

    xml.push_str("</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    Ok(xml)
}

fn write_text_box(
    xml: &mut String,
    slide: &Slide,
    link_rels: &HashMap<usize, String>,
) -> Result<()> {
    let text_box = &slide.text_box;
    let frame = text_box.frame;

    xml.push_str("<p:sp><p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="2" name="TextBox 1"/><p:cNvSpPr txBox="1"/><p:nvPr/>"#);
    xml.push_str("</p:nvSpPr><p:spPr>");
    write!(
        xml,
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.x, frame.y, frame.cx, frame.cy
    )?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);

    let wrap = if text_box.word_wrap { "square" } else { "none" };
    let anchor = match text_box.anchor {
        Anchor::Top => "t",
        Anchor::Middle => "ctr",
    };
    write!(
        xml,
        r#"<p:txBody><a:bodyPr wrap="{wrap}" rtlCol="0" anchor="{anchor}"><a:noAutofit/></a:bodyPr><a:lstStyle/>"#
    )?;

    if text_box.paragraphs.is_empty() {
        // txBody requires at least one paragraph.
        xml.push_str(r#"<a:p><a:endParaRPr lang="ko-KR" dirty="0"/></a:p>"#);
    }
    for paragraph in &text_box.paragraphs {
        let link = paragraph
            .link
            .and_then(|target| link_rels.get(&target))
            .map(String::as_str);
        write_paragraph(xml, paragraph, link)?;
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph, link: Option<&str>) -> Result<()> {
    let algn = match paragraph.align {
        Align::Left => "l",
        Align::Center => "ctr",
    };
    write!(xml, r#"<a:p><a:pPr algn="{algn}"/>"#)?;

    for (idx, line) in paragraph.text.split('\n').enumerate() {
        if idx > 0 {
            xml.push_str("<a:br>");
            write_run_props(xml, "a:rPr", &paragraph.style, None)?;
            xml.push_str("</a:br>");
        }
        if line.is_empty() {
            continue;
        }
        xml.push_str("<a:r>");
        write_run_props(xml, "a:rPr", &paragraph.style, link)?;
        write!(xml, "<a:t>{}</a:t></a:r>", escape_xml(line))?;
    }

    write_run_props(xml, "a:endParaRPr", &paragraph.style, None)?;
    xml.push_str("</a:p>");
    Ok(())
}

/// Writes `<{tag} ...>` character properties. Child order follows the
/// DrawingML schema: fill, latin, ea, hlinkClick.
fn write_run_props(
    xml: &mut String,
    tag: &str,
    style: &TextStyle,
    link: Option<&str>,
) -> Result<()> {
    write!(
        xml,
        r#"<{tag} lang="{RUN_LANG}" altLang="en-US" sz="{}" b="{}" dirty="0">"#,
        (u64::from(style.size_pt) * 100).clamp(MIN_SZ, MAX_SZ),
        if style.bold { 1 } else { 0 }
    )?;
    write!(
        xml,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        style.color.hex()
    )?;
    let font = escape_xml(&style.font);
    write!(xml, r#"<a:latin typeface="{font}"/><a:ea typeface="{font}"/>"#)?;
    if let Some(rel_id) = link {
        write!(
            xml,
            r#"<a:hlinkClick r:id="{rel_id}" action="ppaction://hlinksldjump"/>"#
        )?;
    }
    write!(xml, "</{tag}>")?;
    Ok(())
}
