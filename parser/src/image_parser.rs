use crate::base_parser::{grammar, BodyParser, Fields, FLOAT, INT};
use crate::messages::{ImageCaptureData, MessageBody};
use crate::types::{MessageKind, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;

// Older logs stop after the filename; newer ones append `exp: <int>`.
static IMAGE_CAPTURE_REGEX: Lazy<Regex> = Lazy::new(|| {
    grammar(&format!(
        r"
        \[(?P<trigger_time>{FLOAT})\]\s+
        (?P<filename>\w+\.\w+)
        (?:\s+exp:\s+(?P<exposure>{INT}))?
        "
    ))
});

/// Camera trigger lines, e.g. `VIS: 1244853280.578 [1244853280.348234] PR_..._LC16.pgm`
pub struct ImageCaptureParser;

impl ImageCaptureParser {
    pub fn parse_data(line: &str) -> Result<ImageCaptureData, ParseError> {
        let fields = Fields::matching(&IMAGE_CAPTURE_REGEX, line, MessageKind::ImageCapture)?;

        let filename = fields.text("filename")?;
        let label = filename
            .rsplit_once('.')
            .map_or(filename, |(stem, _)| stem);

        let (exposure_logged, exposure) = match fields.optional("exposure") {
            Some(_) => (true, fields.int("exposure")?),
            None => (false, 0),
        };

        Ok(ImageCaptureData {
            label: label.to_string(),
            filename: filename.to_string(),
            trigger_time: fields.float("trigger_time")?,
            exposure_logged,
            exposure,
        })
    }
}

impl BodyParser for ImageCaptureParser {
    fn kind(&self) -> MessageKind {
        MessageKind::ImageCapture
    }

    fn parse(&self, line: &str) -> Result<MessageBody, ParseError> {
        Self::parse_data(line).map(MessageBody::ImageCapture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_exposure() {
        let line = "VIS: 1244853280.578  [1244853280.348234] PR_20090613_003440_348_LC16.pgm";
        let data = ImageCaptureParser::parse_data(line).unwrap();

        assert_eq!(data.label, "PR_20090613_003440_348_LC16");
        assert_eq!(data.filename, "PR_20090613_003440_348_LC16.pgm");
        assert_eq!(data.trigger_time, 1244853280.348234);
        assert!(!data.exposure_logged);
        assert_eq!(data.exposure, 0);
    }

    #[test]
    fn test_parse_with_exposure() {
        let line = "VIS: 1370910671.991  [1370910671.168201] PR_20130611_003111_168_LC16.tif exp: 1592";
        let data = ImageCaptureParser::parse_data(line).unwrap();

        assert_eq!(data.label, "PR_20130611_003111_168_LC16");
        assert!(data.exposure_logged);
        assert_eq!(data.exposure, 1592);
    }

    #[test]
    fn test_parse_trailing_whitespace() {
        let line = "VIS: 1370910671.991 [1370910671.168201] PR_LC16.tif exp: 1592   ";
        let body = ImageCaptureParser.parse(line).unwrap();
        assert_eq!(body.kind(), MessageKind::ImageCapture);
    }

    #[test]
    fn test_reject_missing_trigger_time() {
        let line = "VIS: 1370910671.991 PR_20130611_003111_168_LC16.tif";
        assert_eq!(
            ImageCaptureParser.parse(line),
            Err(ParseError::GrammarMismatch {
                kind: MessageKind::ImageCapture
            })
        );
    }

    #[test]
    fn test_reject_garbled_exposure() {
        let line = "VIS: 1370910671.991 [1370910671.168201] PR_LC16.tif exp: high";
        assert!(ImageCaptureParser.parse(line).is_err());
    }

    #[test]
    fn test_exposure_needs_separating_space() {
        let line = "VIS: 1370910671.991 [1370910671.168201] PR_LC16.tif exp:1592";
        assert_eq!(
            ImageCaptureParser.parse(line),
            Err(ParseError::GrammarMismatch {
                kind: MessageKind::ImageCapture
            })
        );
    }
}
