//! Connection profile archives.

use std::io::Read;

use bytes::Bytes;
use log::debug;
use pritunl_core::{Error, Result};
use tar::{Archive, EntryType};

use crate::ConnectionProfile;

/// Collect every regular file of a tar stream.
///
/// Directories, links and other special entries are skipped. The caller
/// decides how many profiles it expects.
pub fn extract_profiles(reader: impl Read) -> Result<Vec<ConnectionProfile>> {
    let mut archive = Archive::new(reader);
    let entries = archive
        .entries()
        .map_err(|e| Error::decode("failed to read profile archive").with_source(e))?;

    let mut profiles = Vec::new();
    for entry in entries {
        let mut entry =
            entry.map_err(|e| Error::decode("failed to read archive entry").with_source(e))?;
        if entry.header().entry_type() != EntryType::Regular {
            continue;
        }

        let name = entry
            .path()
            .map_err(|e| Error::decode("invalid archive entry path").with_source(e))?
            .to_string_lossy()
            .into_owned();
        // The declared size comes from the server, only trust bytes actually read.
        let declared = entry.size();
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        if content.len() as u64 != declared {
            return Err(Error::decode(format!(
                "archive entry {name} is truncated: declared {declared} bytes, got {}",
                content.len()
            )));
        }

        debug!("extracted profile {name} of {} bytes", content.len());
        profiles.push(ConnectionProfile {
            name,
            content: Bytes::from(content),
        });
    }
    Ok(profiles)
}
