use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting syllabus scrape...");

        // Extract
        tracing::info!("Walking syllabus registries...");
        let map = self.pipeline.extract().await?;
        tracing::info!("Collected {} syllabi", map.len());

        // Transform
        let records = self.pipeline.transform(map).await?;
        tracing::info!("Grouped into {} courses", records.len());

        // Load
        let output_path = self.pipeline.load(records).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CourseRecord, Season, SyllabusKey, SyllabusMap, Year};
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingPipeline {
        fail_load: bool,
        steps: Mutex<Vec<&'static str>>,
    }

    impl RecordingPipeline {
        fn new(fail_load: bool) -> Self {
            Self {
                fail_load,
                steps: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<SyllabusMap> {
            self.steps.lock().unwrap().push("extract");
            let mut map = SyllabusMap::new();
            map.insert(
                SyllabusKey {
                    year: Year(2023),
                    season: Season::Fall,
                    number: "15213".to_string(),
                    section: String::new(),
                },
                "https://canvas.test/files/1".to_string(),
            );
            Ok(map)
        }

        async fn transform(&self, map: SyllabusMap) -> Result<Vec<CourseRecord>> {
            self.steps.lock().unwrap().push("transform");
            assert_eq!(map.len(), 1);
            Ok(crate::core::export::export(&map))
        }

        async fn load(&self, records: Vec<CourseRecord>) -> Result<String> {
            self.steps.lock().unwrap().push("load");
            assert_eq!(records.len(), 1);
            if self.fail_load {
                return Err(EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            Ok("out/syllabi.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_executes_phases_in_order() {
        let engine = EtlEngine::new(RecordingPipeline::new(false));

        let output = engine.run().await.unwrap();

        assert_eq!(output, "out/syllabi.json");
        assert_eq!(
            *engine.pipeline.steps.lock().unwrap(),
            vec!["extract", "transform", "load"]
        );
    }

    #[tokio::test]
    async fn test_run_propagates_load_failure() {
        let engine = EtlEngine::new(RecordingPipeline::new(true));

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, EtlError::IoError(_)));
    }
}
