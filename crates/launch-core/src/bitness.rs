use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitness {
    Bits32,
    Bits64,
}

impl Bitness {
    /// Fallback when the host cannot tell us.
    pub const DEFAULT: Bitness = Bitness::Bits32;

    pub fn arch(self) -> &'static str {
        match self {
            Bitness::Bits64 => "x86_64",
            Bitness::Bits32 => "x86",
        }
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bitness::Bits64 => f.write_str("64-bit"),
            Bitness::Bits32 => f.write_str("32-bit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BitnessError {
    #[error("OS bitness query is not available on this host")]
    Unavailable,

    #[error("OS bitness query failed: {0}")]
    Query(#[source] std::io::Error),
}

/// Runtime question "is this process running on a 64-bit OS?".
///
/// `None` means the host has no such facility (older OS or not Windows).
pub trait Wow64Query {
    fn is_64bit_os(&self) -> Option<std::io::Result<bool>>;
}

/// Detects host bitness, trusting a 64-bit build before asking the OS.
pub fn detect_with(built_64bit: bool, query: &impl Wow64Query) -> Result<Bitness, BitnessError> {
    if built_64bit {
        return Ok(Bitness::Bits64);
    }
    match query.is_64bit_os() {
        None => Err(BitnessError::Unavailable),
        Some(Ok(true)) => Ok(Bitness::Bits64),
        Some(Ok(false)) => Ok(Bitness::Bits32),
        Some(Err(err)) => Err(BitnessError::Query(err)),
    }
}

pub fn detect() -> Result<Bitness, BitnessError> {
    detect_with(cfg!(target_pointer_width = "64"), &SystemQuery)
}

/// Bitness of the host, falling back to [`Bitness::DEFAULT`] on error.
pub fn detect_or_default(result: Result<Bitness, BitnessError>) -> Bitness {
    match result {
        Ok(bitness) => bitness,
        Err(err) => {
            tracing::warn!("{err}; assuming {}", Bitness::DEFAULT);
            Bitness::DEFAULT
        }
    }
}

pub struct SystemQuery;

impl Wow64Query for SystemQuery {
    #[cfg(windows)]
    fn is_64bit_os(&self) -> Option<std::io::Result<bool>> {
        sys::is_64bit_os()
    }

    #[cfg(not(windows))]
    fn is_64bit_os(&self) -> Option<std::io::Result<bool>> {
        None
    }
}

#[cfg(windows)]
mod sys {
    use std::ffi::{c_char, c_void};
    use std::os::windows::ffi::OsStrExt;

    type Handle = *mut c_void;
    type WinBool = i32;
    type IsWow64Process = unsafe extern "system" fn(Handle, *mut WinBool) -> WinBool;
    type IsWow64Process2 = unsafe extern "system" fn(Handle, *mut u16, *mut u16) -> WinBool;

    const IMAGE_FILE_MACHINE_IA64: u16 = 0x0200;
    const IMAGE_FILE_MACHINE_AMD64: u16 = 0x8664;
    const IMAGE_FILE_MACHINE_ARM64: u16 = 0xAA64;

    #[link(name = "kernel32")]
    unsafe extern "system" {
        fn GetModuleHandleW(name: *const u16) -> Handle;
        fn GetProcAddress(module: Handle, name: *const c_char) -> *mut c_void;
        fn GetCurrentProcess() -> Handle;
    }

    pub(super) fn is_64bit_os() -> Option<std::io::Result<bool>> {
        let name: Vec<u16> = std::ffi::OsStr::new("kernel32.dll")
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        // SAFETY: kernel32 is mapped into every Win32 process; the name is
        // NUL-terminated and the returned handle is not freed.
        let kernel32 = unsafe { GetModuleHandleW(name.as_ptr()) };
        if kernel32.is_null() {
            return None;
        }

        // SAFETY: symbol names are NUL-terminated literals and each pointer is
        // cast to the documented signature of that export.
        unsafe {
            let newer = GetProcAddress(kernel32, c"IsWow64Process2".as_ptr());
            if !newer.is_null() {
                let query: IsWow64Process2 = std::mem::transmute(newer);
                let mut process_machine = 0u16;
                let mut native_machine = 0u16;
                if query(GetCurrentProcess(), &mut process_machine, &mut native_machine) == 0 {
                    return Some(Err(std::io::Error::last_os_error()));
                }
                return Some(Ok(matches!(
                    native_machine,
                    IMAGE_FILE_MACHINE_AMD64 | IMAGE_FILE_MACHINE_ARM64 | IMAGE_FILE_MACHINE_IA64
                )));
            }

            let older = GetProcAddress(kernel32, c"IsWow64Process".as_ptr());
            if older.is_null() {
                return None;
            }
            let query: IsWow64Process = std::mem::transmute(older);
            let mut wow64: WinBool = 0;
            if query(GetCurrentProcess(), &mut wow64) == 0 {
                return Some(Err(std::io::Error::last_os_error()));
            }
            // A 32-bit build only runs under WOW64 on a 64-bit OS.
            Some(Ok(wow64 != 0))
        }
    }
}
