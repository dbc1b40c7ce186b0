//! Pack organisation: input scan, UE5 naming, moves and manifest

pub mod manifest;
pub mod mover;
pub mod naming;
pub mod scan;

pub use manifest::{category_stats, Manifest, MANIFEST_FILE};
pub use mover::{apply_moves, destination_for, move_file};
pub use naming::{assign_names, clean_name, clean_name_part, clean_name_with_case, generate_ue5_name};
pub use scan::{collect_audio_files, is_supported};
