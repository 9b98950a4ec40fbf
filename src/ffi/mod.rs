//! C ABI around the deposit selector, for presentation layers (Swift, Kotlin,
//! C#) that link the `cdylib` instead of the Rust crate.
//!
//! Every entry point tolerates null inputs: a missing slot array or budget is
//! an empty selection, mirroring how the selector treats malformed input.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;
use std::sync::OnceLock;

use crate::challenge::DepositSlot;
use crate::selector::{pick_best_deposits, BudgetInput};
use crate::utils::build_info;

/// Semantic version of the Rust core (mirrors `Cargo.toml`).
pub const CORE_VERSION: &str = build_info::CORE_VERSION;
/// Semantic version of the FFI surface. Bumps when ABI/contract changes.
pub const FFI_VERSION: &str = "0.1.0";

/// Status codes returned across the FFI boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    NullOutput = 1,
}

impl From<FfiStatus> for i32 {
    fn from(value: FfiStatus) -> Self {
        value as i32
    }
}

/// Returns the core (Rust) semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(CORE_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Returns the FFI interface semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_version() -> *const c_char {
    static FFI: OnceLock<CString> = OnceLock::new();
    FFI.get_or_init(|| CString::new(FFI_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Runs the deposit selector over parallel `values`/`done` arrays.
///
/// On success `*out_indices` holds `*out_len` selected positions, to be
/// released with [`ffi_indices_free`]. An empty selection leaves
/// `*out_indices` null and `*out_len` zero.
///
/// Memory use matches [`pick_best_deposits`]: one table entry per whole unit
/// of the effective capacity. Callers passing values or budgets in the
/// billions should cap them first, as an allocation failure aborts the host
/// process.
///
/// # Safety
/// `values` and `done` must each be null or point to `len` readable
/// elements. `budget` must be null or a NUL-terminated string. `out_indices`
/// and `out_len` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn ffi_pick_best_deposits(
    values: *const f64,
    done: *const bool,
    len: usize,
    budget: *const c_char,
    out_indices: *mut *mut usize,
    out_len: *mut usize,
) -> i32 {
    if out_indices.is_null() || out_len.is_null() {
        return FfiStatus::NullOutput.into();
    }
    *out_indices = ptr::null_mut();
    *out_len = 0;

    let slots: Vec<DepositSlot> = if values.is_null() || len == 0 {
        Vec::new()
    } else {
        let values = slice::from_raw_parts(values, len);
        let paid = if done.is_null() {
            None
        } else {
            Some(slice::from_raw_parts(done, len))
        };
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| DepositSlot {
                done: paid.map(|flags| flags[index]).unwrap_or(false),
                ..DepositSlot::new(value)
            })
            .collect()
    };
    let budget = if budget.is_null() {
        BudgetInput::default()
    } else {
        BudgetInput::parse(&CStr::from_ptr(budget).to_string_lossy())
    };

    let picked = pick_best_deposits(&slots, budget);
    if picked.is_empty() {
        return FfiStatus::Ok.into();
    }
    let picked = picked.into_boxed_slice();
    *out_len = picked.len();
    *out_indices = Box::into_raw(picked) as *mut usize;
    FfiStatus::Ok.into()
}

/// Releases an index array returned by [`ffi_pick_best_deposits`].
///
/// # Safety
/// `indices` must be null or a pointer previously returned through
/// `out_indices`, with `len` the matching `out_len`, and not freed before.
#[no_mangle]
pub unsafe extern "C" fn ffi_indices_free(indices: *mut usize, len: usize) {
    if indices.is_null() {
        return;
    }
    drop(Box::from_raw(ptr::slice_from_raw_parts_mut(indices, len)));
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn pick(values: &[f64], done: &[bool], budget: &str) -> Vec<usize> {
        let budget = CString::new(budget).unwrap();
        let mut out: *mut usize = ptr::null_mut();
        let mut out_len = 0usize;
        let status = ffi_pick_best_deposits(
            values.as_ptr(),
            done.as_ptr(),
            values.len(),
            budget.as_ptr(),
            &mut out,
            &mut out_len,
        );
        assert_eq!(status, 0);
        if out.is_null() {
            return Vec::new();
        }
        let picked = slice::from_raw_parts(out, out_len).to_vec();
        ffi_indices_free(out, out_len);
        picked
    }

    #[test]
    fn exposes_versions() {
        assert!(!ffi_core_version().is_null());
        let version = unsafe { CStr::from_ptr(ffi_version()) };
        assert_eq!(version.to_str().unwrap(), FFI_VERSION);
    }

    #[test]
    fn selects_across_the_boundary() {
        let picked = unsafe { pick(&[10.0, 10.0, 10.0], &[false, false, false], "25") };
        assert_eq!(picked, vec![0, 1]);
        let picked = unsafe { pick(&[10.0, 10.0, 10.0], &[true, false, true], "25") };
        assert_eq!(picked, vec![1]);
        let picked = unsafe { pick(&[100.0], &[false], "37,50") };
        assert!(picked.is_empty());
    }

    #[test]
    fn null_inputs_are_empty_selections() {
        let mut out: *mut usize = ptr::null_mut();
        let mut out_len = 7usize;
        let status = unsafe {
            ffi_pick_best_deposits(
                ptr::null(),
                ptr::null(),
                3,
                ptr::null(),
                &mut out,
                &mut out_len,
            )
        };
        assert_eq!(status, 0);
        assert!(out.is_null());
        assert_eq!(out_len, 0);

        let status = unsafe {
            ffi_pick_best_deposits(
                ptr::null(),
                ptr::null(),
                0,
                ptr::null(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        assert_eq!(status, i32::from(FfiStatus::NullOutput));
    }
}
