//! Resource manager databases

use std::ffi::{CStr, CString};
use std::path::Path;
use std::sync::Arc;

use libc::c_char;

use crate::error::{Error, Result};
use crate::ffi;

/// An Xrm database, destroyed on drop. A null handle is a valid empty
/// database; Xlib creates one on the first store.
pub struct ResourceDatabase {
    xlib: Arc<ffi::Xlib>,
    raw: ffi::XrmDatabase,
}

// SAFETY: the database is owned by this value; Xrm calls take the
// library's own database lock
unsafe impl Send for ResourceDatabase {}

fn path_cstring(path: &Path) -> Result<CString> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::InvalidArgument(format!("non UTF-8 path {}", path.display())))?;
    Ok(CString::new(text)?)
}

impl ResourceDatabase {
    pub(crate) fn empty(xlib: Arc<ffi::Xlib>) -> Self {
        // SAFETY: XrmInitialize may be called any number of times
        unsafe { (xlib.XrmInitialize)() };
        ResourceDatabase {
            xlib,
            raw: std::ptr::null_mut(),
        }
    }

    pub(crate) fn from_string(xlib: Arc<ffi::Xlib>, data: &str) -> Result<Self> {
        let data = CString::new(data)?;
        let mut db = Self::empty(xlib);
        // SAFETY: data is NUL-terminated
        db.raw = unsafe { (db.xlib.XrmGetStringDatabase)(data.as_ptr()) };
        if db.raw.is_null() {
            return Err(Error::NullReturn("XrmGetStringDatabase"));
        }
        Ok(db)
    }

    pub(crate) fn from_file(xlib: Arc<ffi::Xlib>, path: &Path) -> Result<Self> {
        let c_path = path_cstring(path)?;
        let mut db = Self::empty(xlib);
        // SAFETY: c_path is NUL-terminated
        db.raw = unsafe { (db.xlib.XrmGetFileDatabase)(c_path.as_ptr()) };
        if db.raw.is_null() {
            return Err(Error::BadName(path.display().to_string()));
        }
        Ok(db)
    }

    /// Take ownership of a database handle, such as one built from
    /// XResourceManagerString.
    ///
    /// # Safety
    /// `raw` must be null or a database no one else will destroy.
    pub unsafe fn from_raw(xlib: Arc<ffi::Xlib>, raw: ffi::XrmDatabase) -> Self {
        ResourceDatabase { xlib, raw }
    }

    pub fn as_raw(&self) -> ffi::XrmDatabase {
        self.raw
    }

    /// Look up a resource by full name and class, e.g.
    /// `("xterm.vt100.background", "XTerm.VT100.Background")`
    pub fn get(&self, name: &str, class: &str) -> Result<Option<String>> {
        let c_name = CString::new(name)?;
        let c_class = CString::new(class)?;
        let mut type_: *mut c_char = std::ptr::null_mut();
        let mut value = ffi::XrmValue::default();
        // SAFETY: strings are NUL-terminated and the out parameters are
        // writable; XrmGetResource accepts a null database
        let found = unsafe {
            (self.xlib.XrmGetResource)(
                self.raw,
                c_name.as_ptr(),
                c_class.as_ptr(),
                &mut type_,
                &mut value,
            )
        };
        if found == ffi::False || value.addr.is_null() {
            return Ok(None);
        }
        // SAFETY: string resources are stored NUL-terminated; the value
        // stays owned by the database
        let text = unsafe { CStr::from_ptr(value.addr) };
        Ok(Some(text.to_string_lossy().into_owned()))
    }

    /// Store `value` under a resource specifier such as `*background`
    pub fn put(&mut self, specifier: &str, value: &str) -> Result<()> {
        let c_spec = CString::new(specifier)?;
        let c_value = CString::new(value)?;
        // SAFETY: raw is null or live; Xlib allocates it when null
        unsafe {
            (self.xlib.XrmPutStringResource)(&mut self.raw, c_spec.as_ptr(), c_value.as_ptr());
        }
        Ok(())
    }

    /// Store one `specifier: value` line
    pub fn put_line(&mut self, line: &str) -> Result<()> {
        let c_line = CString::new(line)?;
        // SAFETY: as for put
        unsafe {
            (self.xlib.XrmPutLineResource)(&mut self.raw, c_line.as_ptr());
        }
        Ok(())
    }

    /// Merge `source` into this database. Entries in `source` win.
    pub fn merge(&mut self, mut source: ResourceDatabase) {
        let raw = std::mem::replace(&mut source.raw, std::ptr::null_mut());
        // SAFETY: XrmMergeDatabases consumes the source database
        unsafe {
            (self.xlib.XrmMergeDatabases)(raw, &mut self.raw);
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        // XrmPutFileDatabase reports nothing when the file cannot be written
        std::fs::File::create(path)?;
        if self.raw.is_null() {
            return Ok(());
        }
        let c_path = path_cstring(path)?;
        // SAFETY: raw is live and c_path is NUL-terminated
        unsafe {
            (self.xlib.XrmPutFileDatabase)(self.raw, c_path.as_ptr());
        }
        Ok(())
    }
}

impl std::fmt::Debug for ResourceDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceDatabase")
            .field("raw", &self.raw)
            .finish()
    }
}

impl Drop for ResourceDatabase {
    fn drop(&mut self) {
        if !self.raw.is_null() {
            // SAFETY: the database is owned by this value
            unsafe {
                (self.xlib.XrmDestroyDatabase)(self.raw);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xlib() -> Option<Arc<ffi::Xlib>> {
        ffi::xlib_for_tests().map(Arc::new)
    }

    #[test]
    fn test_lookup_and_wildcards() {
        let Some(xlib) = xlib() else {
            return;
        };
        let db = ResourceDatabase::from_string(
            xlib,
            "*background: black\nxterm.vt100.foreground: green\n",
        )
        .unwrap();

        assert_eq!(
            db.get("xterm.vt100.background", "XTerm.VT100.Background").unwrap(),
            Some("black".to_string())
        );
        assert_eq!(
            db.get("xterm.vt100.foreground", "XTerm.VT100.Foreground").unwrap(),
            Some("green".to_string())
        );
        assert_eq!(db.get("xterm.font", "XTerm.Font").unwrap(), None);
    }

    #[test]
    fn test_put_and_merge() {
        let Some(xlib) = xlib() else {
            return;
        };
        let mut db = ResourceDatabase::empty(xlib.clone());
        assert_eq!(db.get("app.title", "App.Title").unwrap(), None);
        db.put("app.title", "first").unwrap();
        db.put_line("app.width: 100").unwrap();

        let mut other = ResourceDatabase::empty(xlib);
        other.put("app.title", "second").unwrap();
        db.merge(other);

        assert_eq!(db.get("app.title", "App.Title").unwrap(), Some("second".into()));
        assert_eq!(db.get("app.width", "App.Width").unwrap(), Some("100".into()));
    }

    #[test]
    fn test_save_and_reload() {
        let Some(xlib) = xlib() else {
            return;
        };
        let mut db = ResourceDatabase::empty(xlib.clone());
        db.put("demo.geometry", "300x200").unwrap();

        let path = std::env::temp_dir().join(format!("xlibwrap-resources-{}", std::process::id()));
        db.save(&path).unwrap();
        let reloaded = ResourceDatabase::from_file(xlib.clone(), &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            reloaded.get("demo.geometry", "Demo.Geometry").unwrap(),
            Some("300x200".to_string())
        );

        let missing = Path::new("/nonexistent-xlibwrap-dir/resources");
        assert!(matches!(db.save(missing), Err(Error::Io(_))));
        assert!(matches!(ResourceDatabase::empty(xlib).save(missing), Err(Error::Io(_))));
    }
}
