//! The `examtrack init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create examtrack.toml
    if std::path::Path::new("examtrack.toml").exists() {
        println!("examtrack.toml already exists, skipping.");
    } else {
        std::fs::write("examtrack.toml", SAMPLE_CONFIG)?;
        println!("Created examtrack.toml");
    }

    // Create sample data file
    let data_path = std::path::Path::new("exam-data.json");
    if data_path.exists() {
        println!("exam-data.json already exists, skipping.");
    } else {
        std::fs::write(data_path, SAMPLE_DATA)?;
        println!("Created exam-data.json");
    }

    println!("\nNext steps:");
    println!("  1. Record your exams and fields in exam-data.json");
    println!("  2. Run: examtrack validate --data exam-data.json");
    println!("  3. Run: examtrack analyze");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examtrack configuration

default_format = "text"
output_dir = "./examtrack-results"

[store]
type = "json"
path = "./exam-data.json"
"#;

const SAMPLE_DATA: &str = r##"{
  "fields": [
    {
      "id": 1,
      "name": "テクノロジ系",
      "description": "コンピュータシステム、技術要素、開発技術",
      "color": "#3B82F6"
    },
    {
      "id": 2,
      "name": "マネジメント系",
      "description": "プロジェクトマネジメント、サービスマネジメント",
      "color": "#10B981"
    },
    {
      "id": 3,
      "name": "ストラテジ系",
      "description": "企業活動、経営戦略、システム戦略",
      "color": "#F59E0B"
    }
  ],
  "exams": [
    {
      "id": 1,
      "name": "基本情報技術者試験",
      "exam_date": "2024-10-20",
      "passed": true,
      "total_score": 75,
      "max_total_score": 100,
      "notes": "初回受験で合格",
      "scores": [
        { "field_id": 1, "score": 18, "max_score": 25, "created_at": "2024-10-20T09:00:00Z" },
        { "field_id": 2, "score": 8, "max_score": 10, "created_at": "2024-10-20T09:00:00Z" }
      ]
    },
    {
      "id": 2,
      "name": "応用情報技術者試験",
      "exam_date": "2024-04-21",
      "passed": false,
      "total_score": 55,
      "max_total_score": 100,
      "notes": "再挑戦予定",
      "scores": [
        { "field_id": 1, "score": 15, "max_score": 25, "created_at": "2024-04-21T09:00:00Z" },
        { "field_id": 3, "score": 8, "max_score": 15, "created_at": "2024-04-21T09:00:00Z" }
      ]
    },
    {
      "id": 3,
      "name": "情報セキュリティマネジメント試験",
      "exam_date": "2024-01-15",
      "passed": true,
      "total_score": 82,
      "max_total_score": 100,
      "notes": "セキュリティ分野を重点学習",
      "scores": []
    }
  ]
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use examtrack_core::analytics::compute_analytics;
    use examtrack_core::parser::{parse_data_str, validate_data};
    use examtrack_core::recommend::Recommendation;

    #[test]
    fn sample_data_is_valid() {
        let data = parse_data_str(SAMPLE_DATA, Path::new("exam-data.json")).unwrap();
        assert_eq!(data.exams.len(), 3);
        assert_eq!(data.fields.len(), 3);
        assert!(validate_data(&data).is_empty());
    }

    #[test]
    fn sample_data_analytics() {
        let data = parse_data_str(SAMPLE_DATA, Path::new("exam-data.json")).unwrap();
        let snapshot = compute_analytics(&data.exams, &data.fields);
        assert_eq!(snapshot.pass_rate, 67);
        assert_eq!(snapshot.average_score, 71);
        assert_eq!(snapshot.weakest_field.as_deref(), Some("ストラテジ系"));
        assert_eq!(
            snapshot.recommendations(),
            vec![
                Recommendation::FocusOnField {
                    field: "ストラテジ系".into()
                },
                Recommendation::ScoreImproved,
            ]
        );
    }
}
