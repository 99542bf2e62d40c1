//! Batch generation: one document per catalog definition.
//!
//! A failing definition is recorded and skipped; it never stops the batch.

use crate::writer::{SchemaWriter, WriteError};
use rayon::prelude::*;
use resource_schema_catalog::{Catalog, TypeReference};
use resource_schema_convert::{ConvertError, ConvertOptions, Converter};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub convert: ConvertOptions,
    /// Convert and write on the rayon pool.
    pub parallel: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            convert: ConvertOptions::default(),
            parallel: true,
        }
    }
}

/// A definition that produced no file.
#[derive(Debug)]
pub struct Failure {
    pub reference: TypeReference,
    pub error: GenerateError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} resolve err: {}", self.reference, self.error)
    }
}

/// Outcome of a batch, in reference order.
#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Convert every definition in `catalog` and hand the result to `writer`.
pub fn generate<W>(catalog: &Catalog, writer: &W, options: GenerateOptions) -> Report
where
    W: SchemaWriter + ?Sized,
{
    let references: Vec<&TypeReference> = catalog.references().collect();

    let outcomes: Vec<Result<PathBuf, GenerateError>> = if options.parallel {
        references
            .par_iter()
            .map_init(
                || Converter::with_options(catalog, options.convert),
                |converter, reference| generate_one(converter, writer, reference),
            )
            .collect()
    } else {
        let mut converter = Converter::with_options(catalog, options.convert);
        references
            .iter()
            .map(|reference| generate_one(&mut converter, writer, reference))
            .collect()
    };

    let mut report = Report::default();
    for (reference, outcome) in references.into_iter().zip(outcomes) {
        match outcome {
            Ok(path) => report.written.push(path),
            Err(error) => {
                tracing::debug!(reference = %reference, %error, "definition skipped");
                report.failures.push(Failure {
                    reference: reference.clone(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "generation finished"
    );
    report
}

fn generate_one<W>(
    converter: &mut Converter<'_>,
    writer: &W,
    reference: &str,
) -> Result<PathBuf, GenerateError>
where
    W: SchemaWriter + ?Sized,
{
    let document = converter.document(reference)?;
    Ok(writer.write(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_schema_catalog::{Definition, FieldSchema};
    use resource_schema_convert::OutputDocument;
    use std::sync::Mutex;

    /// Keeps documents in memory; refuses titles in `reject`.
    #[derive(Default)]
    struct MemoryWriter {
        documents: Mutex<Vec<OutputDocument>>,
        reject: Vec<&'static str>,
    }

    impl SchemaWriter for MemoryWriter {
        fn write(&self, document: &OutputDocument) -> Result<PathBuf, WriteError> {
            if self.reject.contains(&document.title.as_str()) {
                return Err(WriteError::Io {
                    path: PathBuf::from(&document.title),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.documents.lock().unwrap().push(document.clone());
            Ok(PathBuf::from(format!("{}.json", document.title)))
        }
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "pkg/api/v1.Widget",
            Definition::new("A widget.")
                .with_field("kind", FieldSchema::primitive("string"))
                .with_field("spec", FieldSchema::reference("pkg/api/v1.WidgetSpec")),
        );
        catalog.insert(
            "pkg/api/v1.WidgetSpec",
            Definition::default().with_field("name", FieldSchema::primitive("string")),
        );
        catalog.insert(
            "pkg/api/v1.Gadget",
            Definition::default().with_field("parts", FieldSchema::array_of("pkg/api/v1.Part")),
        );
        catalog
    }

    #[test]
    fn writes_every_definition() {
        let writer = MemoryWriter::default();
        let report = generate(&catalog(), &writer, GenerateOptions::default());

        assert!(report.is_clean());
        assert_eq!(
            report.written,
            vec![
                PathBuf::from("api_v1_Gadget.json"),
                PathBuf::from("api_v1_Widget.json"),
                PathBuf::from("api_v1_WidgetSpec.json"),
            ]
        );
        assert_eq!(writer.documents.lock().unwrap().len(), 3);
    }

    #[test]
    fn write_failure_does_not_stop_batch() {
        let writer = MemoryWriter {
            reject: vec!["api_v1_Widget"],
            ..Default::default()
        };
        let report = generate(
            &catalog(),
            &writer,
            GenerateOptions {
                parallel: false,
                ..Default::default()
            },
        );

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.reference, "pkg/api/v1.Widget");
        assert!(matches!(failure.error, GenerateError::Write(_)));
        assert_eq!(
            failure.to_string(),
            "pkg/api/v1.Widget resolve err: failed to write api_v1_Widget: denied"
        );
    }

    #[test]
    fn malformed_and_cyclic_definitions_are_reported() {
        let mut catalog = catalog();
        catalog.insert("Unqualified", Definition::default());
        catalog.insert(
            "pkg/api/v1.Loop",
            Definition::default().with_field("self", FieldSchema::reference("pkg/api/v1.Loop")),
        );

        let writer = MemoryWriter::default();
        let report = generate(&catalog, &writer, GenerateOptions::default());

        let failed: Vec<&str> = report
            .failures
            .iter()
            .map(|f| f.reference.as_str())
            .collect();
        assert_eq!(failed, vec!["Unqualified", "pkg/api/v1.Loop"]);
        assert_eq!(report.written.len(), 3);
    }

    #[test]
    fn serial_parallel_and_memoized_runs_agree() {
        let catalog = catalog();
        let run = |options: GenerateOptions| {
            let writer = MemoryWriter::default();
            generate(&catalog, &writer, options);
            let mut documents = writer.documents.into_inner().unwrap();
            documents.sort_by(|a, b| a.title.cmp(&b.title));
            documents
        };

        let serial = run(GenerateOptions {
            parallel: false,
            ..Default::default()
        });
        let parallel = run(GenerateOptions::default());
        let memoized = run(GenerateOptions {
            convert: ConvertOptions { memoize: true },
            parallel: true,
        });

        assert_eq!(serial, parallel);
        assert_eq!(serial, memoized);
    }
}
