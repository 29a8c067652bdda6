use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Programs tried, in order, when no speech command is configured.
const CANDIDATES: &[&str] = &["espeak-ng", "espeak", "say", "spd-say"];

/// Fire-and-forget pronunciation. Starting a new utterance cancels the one in
/// flight; nothing is reported back.
pub trait Speaker {
    fn is_available(&self) -> bool;
    fn speak(&mut self, text: &str);
    fn cancel(&mut self);
}

/// Speech disabled or unsupported: every request is a no-op.
#[derive(Debug, Default)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&mut self, _text: &str) {}

    fn cancel(&mut self) {}
}

/// Speaks through an external TTS program, one child process at a time.
#[derive(Debug)]
pub struct CommandSpeaker {
    program: Option<PathBuf>,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandSpeaker {
    /// `command` is a program plus optional arguments, e.g. `"espeak -s 150"`.
    /// Without one, the first known TTS program on `PATH` is used.
    pub fn detect(command: Option<&str>) -> Self {
        let (program, args) = match command.map(str::split_whitespace) {
            Some(mut parts) => {
                let program = parts.next().and_then(find_program);
                (program, parts.map(str::to_string).collect())
            }
            None => (CANDIDATES.iter().find_map(|c| find_program(c)), Vec::new()),
        };
        match &program {
            Some(p) => tracing::info!(program = %p.display(), "speech available"),
            None => tracing::info!("no speech program found; pronunciation disabled"),
        }
        Self {
            program,
            args,
            child: None,
        }
    }

    pub fn is_speaking(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl Speaker for CommandSpeaker {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn speak(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let Some(program) = self.program.clone() else {
            return;
        };

        self.cancel();
        let spawned = Command::new(&program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => self.child = Some(child),
            Err(e) => tracing::warn!(error = %e, program = %program.display(), "failed to start speech"),
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            if matches!(child.try_wait(), Ok(None)) {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn find_program(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// Builds the speaker for the current settings.
pub fn speaker_for(enabled: bool, command: Option<&str>) -> Box<dyn Speaker> {
    if enabled {
        Box::new(CommandSpeaker::detect(command))
    } else {
        Box::new(NullSpeaker)
    }
}
