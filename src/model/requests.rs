/// A file to attach to a multipart request, e.g. a configuration archive
/// for the teleporter endpoint.
///
/// Requests carrying file parts are sent as multipart forms; any JSON body
/// entries become ordinary form fields alongside the file parts.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name the file is attached under
    pub field: String,
    /// File name reported to the server
    pub file_name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a new file part
    pub fn new(field: &str, file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            field: field.to_string(),
            file_name: file_name.to_string(),
            bytes,
        }
    }
}
