#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Document,
}

impl FileKind {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else if mime.starts_with("audio/") {
            Self::Audio
        } else if mime == "application/pdf" {
            Self::Pdf
        } else {
            Self::Document
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Image => "🖼",
            Self::Video => "🎞",
            Self::Audio => "🎵",
            Self::Pdf => "📕",
            Self::Document => "📄",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileKind;

    #[test]
    fn maps_mime_prefixes() {
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("video/mp4"), FileKind::Video);
        assert_eq!(FileKind::from_mime("audio/mpeg"), FileKind::Audio);
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_mime("text/plain"), FileKind::Document);
    }

    #[test]
    fn pdf_needs_an_exact_match() {
        assert_eq!(FileKind::from_mime("application/pdf+x"), FileKind::Document);
        assert_eq!(FileKind::from_mime(""), FileKind::Document);
        assert_eq!(FileKind::from_mime("imagery/png"), FileKind::Document);
    }

    #[test]
    fn every_kind_has_a_distinct_icon() {
        let kinds = [
            FileKind::Image,
            FileKind::Video,
            FileKind::Audio,
            FileKind::Pdf,
            FileKind::Document,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.icon(), b.icon());
            }
        }
    }
}
