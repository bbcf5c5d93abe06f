//! # Field Type Module
//!
//! Field values, field settings and validator configurations are stored in each field
//! type's internal shape. Processors translate them to and from the shape REST clients
//! see: integer enums become symbolic tokens, stored ids become hrefs, base64 uploads
//! become files on disk.
//!
//! ## Operations
//!
//! Every [`FieldTypeProcessor`] has six operations, `pre_*` (client → internal) and
//! `post_*` (internal → client) for each of the three hashes. All default to the
//! identity.
//!
//! ## Built-in Processors
//!
//! | field type | settings | value |
//! |---|---|---|
//! | `author` | `defaultAuthor` tokens | |
//! | `date`, `time` | `defaultType` tokens | |
//! | `datetime` | `defaultType` tokens, `dateInterval` | |
//! | `media` | `mediaType` tokens | uploads in, `url` out |
//! | `binaryfile` | | uploads in, `url` out |
//! | `image` | | uploads in, `url` and `variations` out |
//! | `relation` | `selectionMethod` tokens, `selectionRootHref` | `destinationContentHref` |
//! | `relationlist` | `selectionMethod` tokens, `selectionDefaultLocationHref` | `destinationContentHrefs` |
//!
//! The [`FieldTypeSerializer`] runs the `post_*` side while rendering; the
//! [`FieldTypeParser`] runs the `pre_*` side on input.

mod parser;
mod processor;
pub mod processors;
mod registry;
mod serializer;
mod uploads;
pub mod vocabulary;

pub use parser::FieldTypeParser;
pub use processor::{apply, Direction, FieldTypeProcessor, HashTarget, ProcessorError};
pub use registry::{FieldTypeProcessorRegistry, ProcessorContext};
pub use serializer::FieldTypeSerializer;
pub use uploads::UploadRegistry;
