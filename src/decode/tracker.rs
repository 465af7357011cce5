//! Song names stored in tracker module headers.

use super::fixed_text;
use crate::signature::Signature;

/// Where a format keeps its song name: `(offset, width)`.
fn name_field(signature: Signature) -> Option<(usize, usize)> {
    match signature {
        Signature::MultiTrackerModule   => Some((4, 20)),
        Signature::ImpulseTrackerModule => Some((4, 26)),
        Signature::ExtendedModule       => Some((17, 20)),
        Signature::ProTrackerModule     => Some((0, 20)),
        Signature::MultiChannelModule   => Some((0, 20)),
        Signature::ScreamTracker3Module => Some((0, 28)),
        Signature::ScreamTracker2Module => Some((0, 20)),
        _                               => None,
    }
}

/// The song name of a tracker module, or `None` when the format keeps no
/// name, the header is short, or the field is blank.
pub fn module_name(signature: Signature, buf: &[u8]) -> Option<String> {
    let (offset, width) = name_field(signature)?;
    let field = buf.get(offset..offset + width)?;
    let name = fixed_text(field);
    (!name.is_empty()).then_some(name)
}

/// `<title> music, "<name>"`, or just `<title> music` for a nameless
/// module.
pub fn describe(signature: Signature, buf: &[u8]) -> String {
    match module_name(signature, buf) {
        Some(name) => format!("{} music, \"{}\"", signature.title(), name),
        None       => format!("{} music", signature.title()),
    }
}
