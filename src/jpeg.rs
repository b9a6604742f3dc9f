//! `CaptionStore` backed by the EXIF `ImageDescription` tag of JPEG files.
//!
//! The JPEG container is handled by `img-parts`, which exposes the raw
//! TIFF payload of the Exif APP1 segment. `kamadak-exif` parses that
//! payload and serializes the rebuilt one on write.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use exif::experimental::Writer;
use exif::{Exif, Field, In, Reader, Tag, Value};
use img_parts::ImageEXIF;
use img_parts::jpeg::Jpeg;

use crate::caption::{CaptionStore, CaptionValue};

const CAPTION_TAG: Tag = Tag::ImageDescription;

#[derive(Clone, Copy, Debug, Default)]
pub struct JpegExif;

impl CaptionStore for JpegExif {
    fn read_caption(&self, path: &Path) -> Result<String> {
        let jpeg = load_jpeg(path)?;

        let Some(raw) = jpeg.exif() else {
            return Ok(String::new());
        };

        let exif = parse_exif(raw)?;
        let value = exif
            .get_field(CAPTION_TAG, In::PRIMARY)
            .map_or(CaptionValue::Other, |field| caption_value(&field.value));

        Ok(value.into_text())
    }

    fn write_caption(&self, path: &Path, caption: &str) -> Result<()> {
        let mut jpeg = load_jpeg(path)?;

        let existing = match jpeg.exif() {
            Some(raw) => Some(parse_exif(raw)?),
            None => None,
        };

        let rebuilt = build_exif(existing.as_ref(), caption).context("build EXIF")?;
        jpeg.set_exif(Some(Bytes::from(rebuilt)));

        let mut encoded = Vec::new();
        jpeg.encoder()
            .write_to(&mut encoded)
            .context("encode JPEG")?;

        std::fs::write(path, encoded).context("write JPEG")?;
        Ok(())
    }
}

fn load_jpeg(path: &Path) -> Result<Jpeg> {
    let data = std::fs::read(path).context("read file")?;
    Jpeg::from_bytes(Bytes::from(data)).context("parse JPEG")
}

fn parse_exif(raw: Bytes) -> Result<Exif> {
    Reader::new().read_raw(raw.to_vec()).context("parse EXIF")
}

fn caption_value(value: &Value) -> CaptionValue {
    match value {
        Value::Ascii(parts) => ascii_value(parts),
        Value::Byte(bytes) | Value::Undefined(bytes, _) => CaptionValue::Bytes(bytes.clone()),
        _ => CaptionValue::Other,
    }
}

fn ascii_value(parts: &[Vec<u8>]) -> CaptionValue {
    let texts = parts
        .iter()
        .map(|part| String::from_utf8(part.clone()))
        .collect::<Result<Vec<_>, _>>();

    match texts {
        Ok(mut texts) if texts.len() == 1 => CaptionValue::Text(texts.remove(0)),
        Ok(texts) => CaptionValue::TextList(texts),
        Err(_) => CaptionValue::BytesList(parts.to_vec()),
    }
}

/// Serializes a TIFF payload holding every field of `existing` except the
/// caption, plus the new caption. Byte order and thumbnail are carried over.
fn build_exif(existing: Option<&Exif>, caption: &str) -> Result<Vec<u8>> {
    let caption_field = Field {
        tag: CAPTION_TAG,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![caption.as_bytes().to_vec()]),
    };

    let mut writer = Writer::new();
    let mut little_endian = false;

    if let Some(exif) = existing {
        little_endian = exif.little_endian();

        for field in exif.fields() {
            if field.tag == CAPTION_TAG && field.ifd_num == In::PRIMARY {
                continue;
            }

            writer.push_field(field);
        }

        if let Some(thumbnail) = thumbnail(exif) {
            writer.set_jpeg(thumbnail, In::THUMBNAIL);
        }
    }

    writer.push_field(&caption_field);

    let mut out = Cursor::new(Vec::new());
    writer.write(&mut out, little_endian)?;
    Ok(out.into_inner())
}

fn thumbnail(exif: &Exif) -> Option<&[u8]> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let len = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;

    exif.buf().get(offset..offset.checked_add(len)?)
}
