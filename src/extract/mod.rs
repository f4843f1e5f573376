//! Card stat extraction.
//!
//! Validates the capture size, classifies the card from the probe field,
//! then reads name, height, metadata, synergies and every stat for that
//! card type. Any failed read discards the whole record.

pub mod fields;
pub mod normalize;
pub mod schema;
pub mod synergy;

#[cfg(test)]
pub mod testing;

use anyhow::Result;
use image::RgbaImage;
use std::sync::Arc;

use crate::layout::{Bound, CardType, Layout, GOALIE_PROBE_TEXT};
use crate::log;
use crate::ocr::Recognizer;
use fields::{height_in_cm, parse_metadata, resolve_synergy, split_name, stat_value};
pub use normalize::NormalizationRules;
pub use schema::{ExtractedCardStats, PropertySchema};
use schema::METADATA_COLUMNS;

/// Extracts one record per card image with a single recognizer.
///
/// Reads are strictly sequential: the card type gates which stat bounds are
/// read at all.
pub struct CardStatsExtractor<R: Recognizer> {
    recognizer: R,
    layout: Arc<Layout>,
    rules: Arc<NormalizationRules>,
}

impl<R: Recognizer> CardStatsExtractor<R> {
    pub fn new(recognizer: R, layout: Arc<Layout>, rules: Arc<NormalizationRules>) -> Self {
        Self {
            recognizer,
            layout,
            rules,
        }
    }

    /// Extracts a record, or `None` when the image has the wrong size or any
    /// read fails. The reason is logged.
    pub fn extract(&self, image: &RgbaImage) -> Option<ExtractedCardStats> {
        let (width, height) = image.dimensions();
        if width != self.layout.width || height != self.layout.height {
            log(&format!(
                "Skipping {}x{} image: expected {}x{}",
                width, height, self.layout.width, self.layout.height
            ));
            return None;
        }

        match self.extract_checked(image) {
            Ok(stats) => Some(stats),
            Err(e) => {
                log(&format!("Extraction failed: {:#}", e));
                None
            }
        }
    }

    fn extract_checked(&self, image: &RgbaImage) -> Result<ExtractedCardStats> {
        let card_type = self.classify(image)?;
        let layout = &self.layout;
        let stat_bounds = layout.stat_bounds(card_type);

        let mut values = Vec::with_capacity(schema::SHARED_COLUMNS.len() + stat_bounds.len());

        let (first_name, last_name) = split_name(&self.read(image, &layout.name)?);
        values.push(first_name);
        values.push(last_name);

        let feet = self.read(image, &layout.height_feet)?;
        let inches = self.read(image, &layout.height_inches)?;
        values.push(height_in_cm(&feet, &inches, &self.rules).to_string());

        values.extend(self.read_metadata(image)?);
        values.push(self.read_synergies(image)?);

        for bound in stat_bounds {
            values.push(stat_value(&self.read(image, bound)?, &self.rules));
        }

        Ok(ExtractedCardStats::new(card_type, values))
    }

    /// Reads the probe field: "HIGH" (any case) means goalie.
    pub fn classify(&self, image: &RgbaImage) -> Result<CardType> {
        let probe = self.read(image, &self.layout.probe)?;
        if probe.eq_ignore_ascii_case(GOALIE_PROBE_TEXT) {
            Ok(CardType::Goalie)
        } else {
            Ok(CardType::Skater)
        }
    }

    /// Metadata values laid out to fill exactly the metadata columns.
    fn read_metadata(&self, image: &RgbaImage) -> Result<Vec<String>> {
        let block = self.read(image, &self.layout.metadata)?;
        let pairs = parse_metadata(&block, &self.rules);

        if pairs.len() > METADATA_COLUMNS.len() {
            log(&format!(
                "Metadata has {} fields, keeping the first {}: {:?}",
                pairs.len(),
                METADATA_COLUMNS.len(),
                pairs
            ));
        }

        let mut values: Vec<String> = pairs
            .into_iter()
            .take(METADATA_COLUMNS.len())
            .map(|(_, value)| value)
            .collect();
        values.resize(METADATA_COLUMNS.len(), String::new());
        Ok(values)
    }

    /// Synergy codes for both slots in slot order, comma separated.
    fn read_synergies(&self, image: &RgbaImage) -> Result<String> {
        let mut codes = Vec::with_capacity(self.layout.synergies.len());
        for bound in &self.layout.synergies {
            let reading = self.read(image, bound)?;
            if let Some(code) = resolve_synergy(&reading, &self.rules) {
                codes.push(code);
            }
        }
        Ok(codes.join(","))
    }

    fn read(&self, image: &RgbaImage, bound: &Bound) -> Result<String> {
        self.recognizer
            .recognize(image, bound.rect, bound.mode)
            .map_err(|e| e.context(format!("Failed to read {}", bound.category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RecognitionMode;
    use std::collections::HashMap;
    use super::testing::ScriptedRecognizer;

    fn card_image() -> RgbaImage {
        RgbaImage::new(1920, 1080)
    }

    fn extractor(recognizer: ScriptedRecognizer) -> CardStatsExtractor<ScriptedRecognizer> {
        CardStatsExtractor::new(
            recognizer,
            Arc::new(Layout::default()),
            Arc::new(NormalizationRules::standard().unwrap()),
        )
    }

    fn skater_script(layout: &Layout) -> ScriptedRecognizer {
        let mut recognizer = ScriptedRecognizer::new()
            .with(&layout.probe, "SKATING")
            .with(&layout.name, "CONNOR MCDAVID")
            .with(&layout.height_feet, "6")
            .with(&layout.height_inches, "1")
            .with(
                &layout.metadata,
                "6' 1\" [193 LBS] SHOOTS: L | NAT: CANADA | AGE: 27 | SALARY: $12,500,000",
            )
            .with(&layout.synergies[0], "Speedster (Tier 2)")
            .with(&layout.synergies[1], "Passing Playmaker");
        for (i, bound) in layout.skater_stats.iter().enumerate() {
            recognizer = recognizer.with(bound, &(70 + i).to_string());
        }
        recognizer
    }

    #[test]
    fn test_extract_skater() {
        let layout = Layout::default();
        let extractor = extractor(skater_script(&layout));

        let stats = extractor.extract(&card_image()).unwrap();
        assert_eq!(stats.card_type(), CardType::Skater);

        let values = stats.values();
        assert_eq!(
            &values[..9],
            &[
                "CONNOR",
                "MCDAVID",
                "185",
                "193",
                "L",
                "CANADA",
                "27",
                "$12,500,000",
                "SP,PP"
            ]
        );
        assert_eq!(values[9], "70");
        assert_eq!(values.last().unwrap(), "93");
    }

    #[test]
    fn test_values_align_with_schema() {
        let layout = Layout::default();
        let schema = PropertySchema::new(&layout, &HashMap::new());

        let skater = extractor(skater_script(&layout))
            .extract(&card_image())
            .unwrap();
        assert_eq!(skater.values().len(), schema.columns(CardType::Skater).len());

        let goalie = extractor(ScriptedRecognizer::new().with(&layout.probe, "HIGH"))
            .extract(&card_image())
            .unwrap();
        assert_eq!(goalie.values().len(), schema.columns(CardType::Goalie).len());
    }

    #[test]
    fn test_classify_probe_is_case_insensitive() {
        let layout = Layout::default();
        for text in ["HIGH", "high", "High"] {
            let extractor = extractor(ScriptedRecognizer::new().with(&layout.probe, text));
            assert_eq!(extractor.classify(&card_image()).unwrap(), CardType::Goalie);
        }
        for text in ["SKATING", "HIGHS", ""] {
            let extractor = extractor(ScriptedRecognizer::new().with(&layout.probe, text));
            assert_eq!(extractor.classify(&card_image()).unwrap(), CardType::Skater);
        }
    }

    #[test]
    fn test_goalie_reads_only_goalie_stats() {
        let layout = Layout::default();
        let extractor = extractor(
            ScriptedRecognizer::new()
                .with(&layout.probe, "HIGH")
                .with(&layout.goalie_stats[0], "7")
                .with(&layout.goalie_stats[1], "42"),
        );

        let stats = extractor.extract(&card_image()).unwrap();
        assert_eq!(stats.card_type(), CardType::Goalie);
        assert_eq!(stats.values()[9], "77");
        assert_eq!(stats.values()[10], "42");

        // probe + name + 2 height + metadata + 2 synergies + 15 stats
        assert_eq!(extractor.recognizer.calls(), 7 + 15);
    }

    #[test]
    fn test_wrong_size_makes_no_reads() {
        let layout = Layout::default();
        let extractor = extractor(skater_script(&layout));

        assert!(extractor.extract(&RgbaImage::new(1280, 720)).is_none());
        assert!(extractor.extract(&RgbaImage::new(1920, 720)).is_none());
        assert!(extractor.extract(&RgbaImage::new(1280, 1080)).is_none());
        assert_eq!(extractor.recognizer.calls(), 0);
    }

    #[test]
    fn test_failed_read_discards_record() {
        let layout = Layout::default();
        let recognizer = skater_script(&layout).failing_on(&layout.skater_stats[5]);
        let extractor = extractor(recognizer);

        assert!(extractor.extract(&card_image()).is_none());
    }

    #[test]
    fn test_failed_probe_discards_record() {
        let layout = Layout::default();
        let extractor = extractor(ScriptedRecognizer::new().failing_on(&layout.probe));

        assert!(extractor.extract(&card_image()).is_none());
        assert_eq!(extractor.recognizer.calls(), 1);
    }

    #[test]
    fn test_reads_use_bound_modes() {
        let layout = Layout::default();
        let extractor = extractor(skater_script(&layout));
        extractor.extract(&card_image()).unwrap();

        let recognizer = &extractor.recognizer;
        assert_eq!(recognizer.mode_for(&layout.probe), Some(RecognitionMode::Text));
        assert_eq!(recognizer.mode_for(&layout.name), Some(RecognitionMode::Text));
        assert_eq!(recognizer.mode_for(&layout.height_feet), Some(RecognitionMode::Numeric));
        assert_eq!(recognizer.mode_for(&layout.height_inches), Some(RecognitionMode::Height));
        assert_eq!(recognizer.mode_for(&layout.metadata), Some(RecognitionMode::Any));
        assert_eq!(recognizer.mode_for(&layout.synergies[1]), Some(RecognitionMode::Any));
        assert_eq!(
            recognizer.mode_for(&layout.skater_stats[0]),
            Some(RecognitionMode::Numeric)
        );
    }

    #[test]
    fn test_missing_metadata_and_synergies_stay_aligned() {
        let layout = Layout::default();
        let extractor = extractor(
            ScriptedRecognizer::new()
                .with(&layout.metadata, "6' 0\" [200 LBS]")
                .with(&layout.synergies[0], "Unknown Trait")
                .with(&layout.synergies[1], "Gladiator"),
        );

        let stats = extractor.extract(&card_image()).unwrap();
        let values = stats.values();
        assert_eq!(&values[3..8], &["200", "", "", "", ""]);
        assert_eq!(values[8], "GL");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let layout = Layout::default();
        let extractor = extractor(skater_script(&layout));

        let first = extractor.extract(&card_image()).unwrap();
        let second = extractor.extract(&card_image()).unwrap();
        assert_eq!(first, second);
    }
}
