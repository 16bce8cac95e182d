use super::*;
use std::path::PathBuf;

fn conll_labels() -> Vec<String> {
    ["O", "B-MISC", "I-MISC", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Tags whitespace-delimited words of `text`, one token per word, and wraps
/// them in `[CLS]` / `[SEP]`.
fn tag_words(text: &str, label_ids: &[usize]) -> Vec<TaggedToken> {
    let mut tokens = vec![TaggedToken {
        word: None,
        offsets: (0, 0),
        special: true,
        label_id: 0,
    }];

    let mut offset = 0;
    for (idx, (word, label_id)) in text.split(' ').zip(label_ids).enumerate() {
        tokens.push(TaggedToken {
            word: Some(idx as u32),
            offsets: (offset, offset + word.len()),
            special: false,
            label_id: *label_id,
        });
        offset += word.len() + 1;
    }

    tokens.push(TaggedToken {
        word: None,
        offsets: (0, 0),
        special: true,
        label_id: 0,
    });
    tokens
}

mod tag_tests {
    use super::*;

    #[test]
    fn test_parse_bio() {
        assert_eq!(Tag::parse("O"), Tag::Outside);
        assert_eq!(Tag::parse("B-PER"), Tag::Begin("PER"));
        assert_eq!(Tag::parse("I-ORG"), Tag::Inside("ORG"));
        assert_eq!(Tag::parse("B-WORK_OF_ART"), Tag::Begin("WORK_OF_ART"));
    }

    #[test]
    fn test_parse_bioes() {
        assert_eq!(Tag::parse("S-LOC"), Tag::Begin("LOC"));
        assert_eq!(Tag::parse("E-LOC"), Tag::Inside("LOC"));
    }

    #[test]
    fn test_parse_unprefixed() {
        assert_eq!(Tag::parse("PERSON"), Tag::Inside("PERSON"));
        assert_eq!(Tag::parse("WORK_OF_ART"), Tag::Inside("WORK_OF_ART"));
        assert_eq!(Tag::parse("B-"), Tag::Inside("B-"));
        assert_eq!(Tag::parse(""), Tag::Outside);
    }
}

mod label_tests {
    use super::*;

    #[test]
    fn test_labels_from_config() {
        let json = r#"{
            "hidden_size": 768,
            "id2label": {"0": "O", "2": "I-PER", "1": "B-PER"}
        }"#;
        let labels = labels_from_config(json).unwrap();
        assert_eq!(labels, vec!["O", "B-PER", "I-PER"]);
    }

    #[test]
    fn test_labels_missing_id2label() {
        let err = labels_from_config(r#"{"hidden_size": 768}"#).unwrap_err();
        assert!(matches!(err, NerError::InvalidLabels { .. }));
    }

    #[test]
    fn test_labels_non_integer_id() {
        let err = labels_from_config(r#"{"id2label": {"zero": "O"}}"#).unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }

    #[test]
    fn test_labels_gap_is_out_of_range() {
        let err = labels_from_config(r#"{"id2label": {"0": "O", "5": "B-PER"}}"#).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_labels_empty() {
        assert!(labels_from_config(r#"{"id2label": {}}"#).is_err());
    }
}

mod decode_tests {
    use super::*;

    #[test]
    fn test_decode_begin_inside() {
        let text = "Ask John Smith at Acme today";
        let tokens = tag_words(text, &[0, 3, 4, 0, 5, 0]);
        let entities = decode_entities(text, &tokens, &conll_labels());

        assert_eq!(
            entities,
            vec![Entity::new("John Smith", "PER"), Entity::new("Acme", "ORG")]
        );
    }

    #[test]
    fn test_decode_consecutive_begins_split() {
        let text = "Paris London";
        let tokens = tag_words(text, &[7, 7]);
        let entities = decode_entities(text, &tokens, &conll_labels());

        assert_eq!(
            entities,
            vec![Entity::new("Paris", "LOC"), Entity::new("London", "LOC")]
        );
    }

    #[test]
    fn test_decode_inside_without_begin_opens_span() {
        let text = "the United Nations";
        let tokens = tag_words(text, &[0, 6, 6]);
        let entities = decode_entities(text, &tokens, &conll_labels());

        assert_eq!(entities, vec![Entity::new("United Nations", "ORG")]);
    }

    #[test]
    fn test_decode_type_change_closes_span() {
        let text = "Acme Berlin";
        let tokens = tag_words(text, &[5, 8]);
        let entities = decode_entities(text, &tokens, &conll_labels());

        assert_eq!(
            entities,
            vec![Entity::new("Acme", "ORG"), Entity::new("Berlin", "LOC")]
        );
    }

    #[test]
    fn test_decode_subwords_follow_first_token() {
        // "Ohio" split into "Oh" + "##io"; the continuation is mislabeled O.
        let text = "in Ohio";
        let tokens = vec![
            TaggedToken {
                word: Some(0),
                offsets: (0, 2),
                special: false,
                label_id: 0,
            },
            TaggedToken {
                word: Some(1),
                offsets: (3, 5),
                special: false,
                label_id: 7,
            },
            TaggedToken {
                word: Some(1),
                offsets: (5, 7),
                special: false,
                label_id: 0,
            },
        ];

        let entities = decode_entities(text, &tokens, &conll_labels());
        assert_eq!(entities, vec![Entity::new("Ohio", "LOC")]);
    }

    #[test]
    fn test_decode_unknown_label_id_is_outside() {
        let text = "Acme";
        let tokens = tag_words(text, &[42]);
        assert!(decode_entities(text, &tokens, &conll_labels()).is_empty());
    }

    #[test]
    fn test_decode_unprefixed_labels_merge() {
        let labels: Vec<String> = ["O", "PERSON"].iter().map(|s| s.to_string()).collect();
        let text = "Ada Lovelace wrote";
        let tokens = tag_words(text, &[1, 1, 0]);

        assert_eq!(
            decode_entities(text, &tokens, &labels),
            vec![Entity::new("Ada Lovelace", "PERSON")]
        );
    }

    #[test]
    fn test_decode_only_specials() {
        let tokens = tag_words("", &[]);
        assert!(decode_entities("", &tokens, &conll_labels()).is_empty());
    }

    #[test]
    fn test_decode_invalid_offsets_skipped() {
        let text = "é";
        let tokens = vec![TaggedToken {
            word: Some(0),
            offsets: (0, 1),
            special: false,
            label_id: 3,
        }];
        assert!(decode_entities(text, &tokens, &conll_labels()).is_empty());
    }
}

mod entity_tests {
    use super::*;

    #[test]
    fn test_entity_serializes_as_pair() {
        let entity = Entity::new("ISO 9001", "MISC");
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"["ISO 9001","MISC"]"#);
    }

    #[test]
    fn test_entity_deserializes_from_pair() {
        let entity: Entity = serde_json::from_str(r#"["QHSE","ORG"]"#).unwrap();
        assert_eq!(entity, Entity::new("QHSE", "ORG"));
    }
}

mod extractor_tests {
    use super::*;

    #[test]
    fn test_stub_extractor() {
        let extractor = EntityExtractor::stub().unwrap();
        assert!(extractor.is_stub());
        assert!(extractor.labels().is_empty());

        let entities = extractor
            .extract("What is the Emergency Response Module?")
            .unwrap();
        assert_eq!(
            entities,
            vec![Entity::new("Emergency Response Module", "MISC")]
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = NerConfig::default();
        assert!(config.model_dir.is_none());
        assert_eq!(config.max_seq_len, NER_MAX_SEQ_LEN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_run_config() {
        let run = crate::config::Config {
            ner_path: Some(PathBuf::from("/models/ner")),
            ..Default::default()
        };
        assert_eq!(
            NerConfig::from_config(&run).model_dir,
            Some(PathBuf::from("/models/ner"))
        );
    }

    #[test]
    fn test_config_rejects_empty_dir() {
        assert!(NerConfig::new("").validate().is_err());
    }

    #[test]
    fn test_load_missing_model_dir() {
        let result = EntityExtractor::load(NerConfig::new("/nonexistent/ner"));
        assert!(matches!(result, Err(NerError::ModelNotFound { .. })));
    }

    #[test]
    fn test_load_bad_label_map() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"hidden_size": 8}"#).unwrap();
        std::fs::write(dir.path().join("model.safetensors"), b"").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

        let result = EntityExtractor::load(NerConfig::new(dir.path()));
        assert!(matches!(result, Err(NerError::InvalidLabels { .. })));
    }
}
