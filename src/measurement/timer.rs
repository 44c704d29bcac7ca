//! Platform-specific cycle counter access.
//!
//! The counter is read with:
//! - x86_64: `lfence; rdtsc` with compiler fences
//! - aarch64: `isb; mrs cntvct_el0`
//! - Fallback: nanoseconds since a process-local `std::time::Instant` epoch

/// Read the current value of the hardware cycle counter.
///
/// Monotonically non-decreasing for the process lifetime, never fails, and
/// costs a handful of nanoseconds per call. The tick rate is unknown until
/// calibrated; see [`super::Calibration`].
#[inline]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        read_cycles_x86_64()
    }

    #[cfg(target_arch = "aarch64")]
    {
        read_cycles_aarch64()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        read_cycles_fallback()
    }
}

/// x86_64: lfence serializes prior instructions so the read lands at a
/// well-defined point in program order.
#[cfg(target_arch = "x86_64")]
#[inline]
fn read_cycles_x86_64() -> u64 {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    let cycles: u64;
    unsafe {
        std::arch::asm!(
            "lfence",
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            out("rax") cycles,
            out("rdx") _,
            options(nostack, nomem),
        );
    }

    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    cycles
}

/// aarch64: isb drains the pipeline before reading the virtual counter.
#[cfg(target_arch = "aarch64")]
#[inline]
fn read_cycles_aarch64() -> u64 {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    let cycles: u64;
    unsafe {
        std::arch::asm!(
            "isb",
            "mrs {}, cntvct_el0",
            out(reg) cycles,
            options(nostack, nomem),
        );
    }

    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    cycles
}

/// Fallback for platforms without an accessible cycle counter: nanoseconds
/// since a fixed process-local epoch, so readings stay comparable within a
/// run.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
fn read_cycles_fallback() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();

    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as u64
}
