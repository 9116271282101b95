//! Static file-format table used by content-type detection.

use std::fmt;

/// Broad content category shown as a search facet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatCategory {
    Text,
    Image,
    Audio,
    Video,
    Software,
    Archive,
    Spreadsheet,
    Presentation,
    Dataset,
    Email,
    Unknown,
}

impl FormatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Software => "Software",
            Self::Archive => "Archive",
            Self::Spreadsheet => "Spreadsheet",
            Self::Presentation => "Presentation",
            Self::Dataset => "Dataset",
            Self::Email => "Email",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One known file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatEntry {
    pub extension: &'static str,
    pub mimetype: &'static str,
    pub description: &'static str,
    pub category: FormatCategory,
}

const fn entry(
    extension: &'static str,
    mimetype: &'static str,
    description: &'static str,
    category: FormatCategory,
) -> FormatEntry {
    FormatEntry {
        extension,
        mimetype,
        description,
        category,
    }
}

use FormatCategory::*;

/// Extensions whose canonical format wins over any detected mimetype.
const OVERRIDES: &[FormatEntry] = &[
    entry("rtf", "application/rtf", "Rich Text Format", Text),
    entry("csv", "text/csv", "Comma-Separated Values", Dataset),
    entry("eml", "message/rfc822", "Email Message", Email),
];

/// Extension lookup table, first match wins for mimetype lookups.
const FORMATS: &[FormatEntry] = &[
    entry("txt", "text/plain", "Plain Text", Text),
    entry("pdf", "application/pdf", "Portable Document Format", Text),
    entry("doc", "application/msword", "Microsoft Word Document", Text),
    entry(
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "Microsoft Word Document",
        Text,
    ),
    entry("odt", "application/vnd.oasis.opendocument.text", "OpenDocument Text", Text),
    entry("html", "text/html", "HTML Document", Text),
    entry("htm", "text/html", "HTML Document", Text),
    entry("xml", "text/xml", "XML Document", Text),
    entry("md", "text/markdown", "Markdown Document", Text),
    entry("epub", "application/epub+zip", "EPUB Publication", Text),
    entry("jpg", "image/jpeg", "JPEG Image", Image),
    entry("jpeg", "image/jpeg", "JPEG Image", Image),
    entry("png", "image/png", "Portable Network Graphics", Image),
    entry("gif", "image/gif", "Graphics Interchange Format", Image),
    entry("tif", "image/tiff", "Tagged Image File Format", Image),
    entry("tiff", "image/tiff", "Tagged Image File Format", Image),
    entry("jp2", "image/jp2", "JPEG 2000 Image", Image),
    entry("bmp", "image/bmp", "Bitmap Image", Image),
    entry("svg", "image/svg+xml", "Scalable Vector Graphics", Image),
    entry("webp", "image/webp", "WebP Image", Image),
    entry("mp3", "audio/mpeg", "MPEG Audio", Audio),
    entry("wav", "audio/x-wav", "Waveform Audio", Audio),
    entry("flac", "audio/flac", "Free Lossless Audio Codec", Audio),
    entry("ogg", "audio/ogg", "Ogg Audio", Audio),
    entry("m4a", "audio/mp4", "MPEG-4 Audio", Audio),
    entry("mp4", "video/mp4", "MPEG-4 Video", Video),
    entry("mov", "video/quicktime", "QuickTime Video", Video),
    entry("avi", "video/x-msvideo", "Audio Video Interleave", Video),
    entry("mkv", "video/x-matroska", "Matroska Video", Video),
    entry("webm", "video/webm", "WebM Video", Video),
    entry("exe", "application/x-msdownload", "Windows Executable", Software),
    entry("jar", "application/java-archive", "Java Archive", Software),
    entry("zip", "application/zip", "ZIP Archive", Archive),
    entry("tar", "application/x-tar", "Tape Archive", Archive),
    entry("gz", "application/gzip", "Gzip Archive", Archive),
    entry("7z", "application/x-7z-compressed", "7-Zip Archive", Archive),
    entry("xls", "application/vnd.ms-excel", "Microsoft Excel Spreadsheet", Spreadsheet),
    entry(
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "Microsoft Excel Spreadsheet",
        Spreadsheet,
    ),
    entry("ods", "application/vnd.oasis.opendocument.spreadsheet", "OpenDocument Spreadsheet", Spreadsheet),
    entry("ppt", "application/vnd.ms-powerpoint", "Microsoft PowerPoint Presentation", Presentation),
    entry(
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "Microsoft PowerPoint Presentation",
        Presentation,
    ),
    entry("json", "application/json", "JSON Data", Dataset),
    entry("sav", "application/x-spss-sav", "SPSS Data File", Dataset),
    entry("mbox", "application/mbox", "Mailbox", Email),
];

/// Canonical format forced by an extension, regardless of detection.
pub fn override_for(extension: &str) -> Option<&'static FormatEntry> {
    OVERRIDES.iter().find(|e| e.extension == extension)
}

/// Format registered for an extension.
pub fn by_extension(extension: &str) -> Option<&'static FormatEntry> {
    override_for(extension).or_else(|| FORMATS.iter().find(|e| e.extension == extension))
}

/// First format registered for a mimetype.
pub fn by_mimetype(mimetype: &str) -> Option<&'static FormatEntry> {
    OVERRIDES
        .iter()
        .chain(FORMATS.iter())
        .find(|e| e.mimetype == mimetype)
}
