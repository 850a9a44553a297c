//! EPUB 2 container writer for the assembled chapters.
//!
//! Produces `mimetype` (stored, first), `META-INF/container.xml`, an OPF package
//! document, an NCX table of contents, the stylesheet, and one XHTML document
//! per section.

use std::fmt::Write as _;
use std::io::{Seek, Write};

use sha2::{Digest, Sha256};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::style::default_stylesheet;

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

#[derive(Debug, thiserror::Error)]
pub enum EpubError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub language: String,
    /// `YYYY-MM-DD`, written as `dc:date` when present.
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// XHTML body fragment as produced by the chapter extractor.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpubBook {
    pub metadata: BookMetadata,
    pub stylesheet: String,
    pub sections: Vec<Section>,
}

impl EpubBook {
    pub fn new(metadata: BookMetadata) -> Self {
        Self {
            metadata,
            stylesheet: default_stylesheet(),
            sections: Vec::new(),
        }
    }

    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }

    pub fn add_section(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.sections.push(Section {
            title: title.into(),
            body: body.into(),
        });
    }

    /// Stable identifier derived from the book title and section titles.
    pub fn identifier(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.metadata.title.as_bytes());
        for section in &self.sections {
            hasher.update(b"\n");
            hasher.update(section.title.as_bytes());
        }
        let mut hex = String::from("urn:sha256:");
        for byte in hasher.finalize() {
            let _ = write!(&mut hex, "{byte:02x}");
        }
        hex
    }
}

/// Write `book` as an EPUB container into `writer`.
pub fn write_epub<W: Write + Seek>(book: &EpubBook, writer: W) -> Result<(), EpubError> {
    let mut zip = ZipWriter::new(writer);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("mimetype", stored)?;
    zip.write_all(b"application/epub+zip")?;

    zip.start_file("META-INF/container.xml", deflated)?;
    zip.write_all(CONTAINER_XML.as_bytes())?;

    let identifier = book.identifier();

    zip.start_file("OEBPS/content.opf", deflated)?;
    zip.write_all(package_document(book, &identifier).as_bytes())?;

    zip.start_file("OEBPS/toc.ncx", deflated)?;
    zip.write_all(navigation_document(book, &identifier).as_bytes())?;

    zip.start_file("OEBPS/style.css", deflated)?;
    zip.write_all(book.stylesheet.as_bytes())?;

    for (position, section) in book.sections.iter().enumerate() {
        zip.start_file(format!("OEBPS/{}", section_href(position)), deflated)?;
        zip.write_all(section_document(section).as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

fn section_id(position: usize) -> String {
    format!("section-{:04}", position + 1)
}

fn section_href(position: usize) -> String {
    format!("text/{}.xhtml", section_id(position))
}

fn package_document(book: &EpubBook, identifier: &str) -> String {
    let meta = &book.metadata;
    let mut opf = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
"#,
    );
    let _ = writeln!(opf, "    <dc:title>{}</dc:title>", escape_xml(&meta.title));
    let _ = writeln!(
        opf,
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>",
        escape_xml(identifier)
    );
    let language = if meta.language.is_empty() { "en" } else { &meta.language };
    let _ = writeln!(opf, "    <dc:language>{}</dc:language>", escape_xml(language));
    if !meta.author.is_empty() {
        let _ = writeln!(opf, "    <dc:creator>{}</dc:creator>", escape_xml(&meta.author));
    }
    if let Some(description) = &meta.description {
        let _ = writeln!(
            opf,
            "    <dc:description>{}</dc:description>",
            escape_xml(description)
        );
    }
    if let Some(date) = &meta.date {
        let _ = writeln!(opf, "    <dc:date>{}</dc:date>", escape_xml(date));
    }

    opf.push_str("  </metadata>\n  <manifest>\n");
    opf.push_str(
        "    <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n",
    );
    opf.push_str("    <item id=\"style\" href=\"style.css\" media-type=\"text/css\"/>\n");
    for position in 0..book.sections.len() {
        let _ = writeln!(
            opf,
            "    <item id=\"{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>",
            section_id(position),
            section_href(position)
        );
    }

    opf.push_str("  </manifest>\n  <spine toc=\"ncx\">\n");
    for position in 0..book.sections.len() {
        let _ = writeln!(opf, "    <itemref idref=\"{}\"/>", section_id(position));
    }
    opf.push_str("  </spine>\n</package>\n");
    opf
}

fn navigation_document(book: &EpubBook, identifier: &str) -> String {
    let mut ncx = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
"#,
    );
    let _ = writeln!(
        ncx,
        "    <meta name=\"dtb:uid\" content=\"{}\"/>",
        escape_xml(identifier)
    );
    ncx.push_str(
        "    <meta name=\"dtb:depth\" content=\"1\"/>\n    <meta name=\"dtb:totalPageCount\" content=\"0\"/>\n    <meta name=\"dtb:maxPageNumber\" content=\"0\"/>\n  </head>\n",
    );
    let _ = writeln!(
        ncx,
        "  <docTitle>\n    <text>{}</text>\n  </docTitle>\n  <navMap>",
        escape_xml(&book.metadata.title)
    );

    for (position, section) in book.sections.iter().enumerate() {
        let play_order = position + 1;
        let _ = writeln!(
            ncx,
            "    <navPoint id=\"navpoint-{play_order}\" playOrder=\"{play_order}\">\n      <navLabel>\n        <text>{}</text>\n      </navLabel>\n      <content src=\"{}\"/>\n    </navPoint>",
            escape_xml(&section.title),
            section_href(position)
        );
    }

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

fn section_document(section: &Section) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <title>{title}</title>
  <link rel="stylesheet" type="text/css" href="../style.css"/>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_xml(&section.title),
        body = section.body
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
