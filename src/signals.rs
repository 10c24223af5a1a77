//! Termination signal handling.
//!
//! SIGHUP, SIGTERM and SIGINT (which only arrives as a signal while the
//! terminal is in cooked mode) restore the terminal settings captured at
//! startup, clear the screen and exit with status 0. The handler never
//! touches the store, so a half-written settings file cannot result from it.

#[cfg(unix)]
mod imp {
    use std::io;
    use std::sync::OnceLock;

    static SAVED_TERMIOS: OnceLock<libc::termios> = OnceLock::new();

    const CLEAR: &[u8] = b"\x1b[2J\x1b[H";

    extern "C" fn on_terminate(_signal: libc::c_int) {
        // Only async-signal-safe calls from here on.
        unsafe {
            if let Some(termios) = SAVED_TERMIOS.get() {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, termios);
            }
            libc::write(libc::STDOUT_FILENO, CLEAR.as_ptr().cast(), CLEAR.len());
            libc::_exit(0);
        }
    }

    fn save_termios() {
        let mut termios = std::mem::MaybeUninit::<libc::termios>::uninit();
        let ret = unsafe { libc::tcgetattr(libc::STDIN_FILENO, termios.as_mut_ptr()) };
        if ret == 0 {
            // SAFETY: tcgetattr filled the struct.
            let _ = SAVED_TERMIOS.set(unsafe { termios.assume_init() });
        }
    }

    pub fn install() -> io::Result<()> {
        save_termios();
        let handler = on_terminate as extern "C" fn(libc::c_int) as libc::sighandler_t;
        for signal in [libc::SIGHUP, libc::SIGTERM, libc::SIGINT] {
            let previous = unsafe { libc::signal(signal, handler) };
            if previous == libc::SIG_ERR {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }
}

#[cfg(not(unix))]
mod imp {
    pub fn install() -> std::io::Result<()> {
        Ok(())
    }
}

/// Install the termination handlers. Call once, before the first frame.
pub fn install() -> std::io::Result<()> {
    log::debug!("Installing termination signal handlers");
    imp::install()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_install_succeeds_without_a_tty() {
        // tcgetattr fails on a non-tty stdin; handlers still install.
        assert!(install().is_ok());
        unsafe {
            for signal in [libc::SIGHUP, libc::SIGTERM, libc::SIGINT] {
                libc::signal(signal, libc::SIG_DFL);
            }
        }
    }
}
