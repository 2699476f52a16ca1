//! Self-pipe wakeup for the runtime loop's idle wait.
//!
//! [`WakeupSender`] (Clone, write end) and [`WakeupReceiver`] (read end) are
//! backed by an OS pipe. The loop sleeps in `libc::poll()` on the read end
//! with the remaining tick budget as timeout; any thread can cut that sleep
//! short by writing a byte.

use std::io;
use std::os::unix::io::RawFd;
use std::sync::Arc;
use std::time::Duration;

/// Write end of the wakeup pipe. The underlying fd is reference-counted and
/// only closed when the last clone is dropped.
#[derive(Clone)]
pub struct WakeupSender {
    fd: Arc<OwnedFd>,
}

pub struct WakeupReceiver {
    fd: OwnedFd,
}

/// RAII wrapper for a raw fd that closes on drop.
struct OwnedFd(RawFd);

impl Drop for OwnedFd {
    fn drop(&mut self) {
        // SAFETY: fd is a valid pipe end created by pipe().
        unsafe {
            libc::close(self.0);
        }
    }
}

/// Create a wakeup pipe pair. Both ends are non-blocking: a full pipe already
/// guarantees a pending wakeup, and `drain()` must never block.
pub fn wakeup_pipe() -> io::Result<(WakeupSender, WakeupReceiver)> {
    let mut fds = [0 as RawFd; 2];
    // SAFETY: fds is a valid 2-element array.
    let ret = unsafe { libc::pipe(fds.as_mut_ptr()) };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    let read = OwnedFd(fds[0]);
    let write = OwnedFd(fds[1]);
    set_nonblocking(read.0)?;
    set_nonblocking(write.0)?;

    Ok((
        WakeupSender {
            fd: Arc::new(write),
        },
        WakeupReceiver { fd: read },
    ))
}

fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    // SAFETY: fd is a valid fd just created by pipe().
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags == -1 {
            return Err(io::Error::last_os_error());
        }
        if libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

impl WakeupSender {
    /// Errors (EAGAIN, broken pipe) are ignored: a full pipe already holds a
    /// pending wakeup and a dropped receiver has nobody left to wake.
    pub fn wake(&self) {
        // SAFETY: fd is a valid pipe write end; buf is a valid 1-byte slice.
        unsafe {
            libc::write(self.fd.0, [1u8].as_ptr().cast(), 1);
        }
    }
}

impl WakeupReceiver {
    /// Block until woken or until `timeout` elapses. Returns whether a wakeup
    /// arrived; pending wakeups are consumed either way.
    pub fn wait(&self, timeout: Duration) -> bool {
        let mut pfd = libc::pollfd {
            fd: self.fd.0,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(i32::MAX as u128) as libc::c_int;
        // SAFETY: pfd is a valid pollfd for the lifetime of the call.
        let ready = unsafe { libc::poll(&mut pfd, 1, millis) };
        let woken = ready > 0 && (pfd.revents & libc::POLLIN) != 0;
        self.drain();
        woken
    }

    /// Drain all pending bytes from the pipe (non-blocking).
    pub fn drain(&self) {
        let mut buf = [0u8; 64];
        loop {
            // SAFETY: fd is a valid non-blocking pipe read end; buf is valid.
            let n = unsafe { libc::read(self.fd.0, buf.as_mut_ptr().cast(), buf.len()) };
            if n <= 0 {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/wakeup.rs"]
mod tests;
