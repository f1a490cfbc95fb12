use once_cell::sync::Lazy;
use regex::Regex;
use rocket::fs::TempFile;
use rocket::tokio::io::AsyncReadExt;

//language=RegExp
static LEADING_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*[/\\]").unwrap());
//language=RegExp
static BANNED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>|:&;#?*"\x00-\x1f]"#).unwrap());

#[derive(FromForm)]
#[allow(non_snake_case)] // cannot serde rename the field, and it's better to have camel case for the api
pub struct UploadFilesRequest<'a> {
    /// every file being uploaded in this batch
    pub files: Vec<TempFile<'a>>,
    /// leave blank for top level folder
    ///
    /// kept as a String since form bodies from some clients fail to parse numeric fields
    folderId: Option<String>,
}

/// a single uploaded file, fully read and detached from the request
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// the name as the client sent it. This value may be unsafe, see [`UploadedFile::file_name`]
    pub name: String,
    pub contents: Vec<u8>,
}

impl UploadFilesRequest<'_> {
    /// `None` for the root folder. `0` is also treated as root
    pub fn folder_id(&self) -> Result<Option<u32>, String> {
        match &self.folderId {
            None => Ok(None),
            Some(id) if id.trim().is_empty() => Ok(None),
            Some(id) => match id.trim().parse::<u32>() {
                Ok(0) => Ok(None),
                Ok(parsed) => Ok(Some(parsed)),
                Err(_) => Err(format!("{id} is not a valid folder id")),
            },
        }
    }

    /// reads every file in the form into memory, in the order they were submitted
    pub async fn read_files(&self) -> std::io::Result<Vec<UploadedFile>> {
        let mut uploaded = Vec::with_capacity(self.files.len());
        for file in self.files.iter() {
            let name = file
                .raw_name()
                .map(|raw| raw.dangerous_unsafe_unsanitized_raw().as_str().to_string())
                .unwrap_or_default();
            let mut contents = Vec::with_capacity(file.len() as usize);
            if file.len() > 0 {
                let reader = file.open().await?;
                rocket::tokio::pin!(reader);
                reader.read_to_end(&mut contents).await?;
            }
            uploaded.push(UploadedFile { name, contents });
        }
        Ok(uploaded)
    }
}

impl UploadedFile {
    pub fn new(name: &str, contents: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            contents: contents.to_vec(),
        }
    }

    /// returns only the final path component of the client's file name, with characters that can't
    /// be safely stored on disk removed. Will return None if nothing usable remains
    pub fn file_name(&self) -> Option<String> {
        let base_name = LEADING_PATH.replace(&self.name, "");
        let cleaned = BANNED_CHARS.replace_all(&base_name, "").trim().to_string();
        if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
            return None;
        }
        Some(cleaned)
    }
}
