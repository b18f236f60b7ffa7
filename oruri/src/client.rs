use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::data::*;
use crate::deserialize::Deserialize;
use crate::error::{ConnectionResult, ConnectionError, RequestResult, RequestError, Exists};
use crate::mode::SplitMode;
use crate::wire;

const REAP_GRACE: Duration = Duration::from_millis(500);
const REAP_POLL: Duration = Duration::from_millis(10);

pub struct ClientBuilder {
    par_command: String,
    par_model: Option<String>,
    par_mode: SplitMode,
    par_disable_pipes: Vec<String>,
    par_split_sentences: bool,
}

impl ClientBuilder {
    pub fn new() -> ClientBuilder {
        ClientBuilder{
            par_command: "oruri".to_owned(),
            par_model: None,
            par_mode: SplitMode::default(),
            par_disable_pipes: Vec::new(),
            par_split_sentences: true,
        }
    }

    /// Launches the engine process and performs the init handshake. The
    /// engine is expected to exit once its stdin closes; one that lingers
    /// is killed when the `Client` is dropped.
    pub fn spawn(self) -> ConnectionResult<Client> {
        let mut child = Command::new(&self.par_command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let stdin = match child.stdin.take() {
            Some(stdin) => stdin,
            None => return Err(ConnectionError::NoStdio),
        };

        let stdout = match child.stdout.take() {
            Some(stdout) => BufReader::new(stdout),
            None => return Err(ConnectionError::NoStdio),
        };

        let mut client = Client{
            child,
            stdin: Some(stdin),
            stdout,
            pipe_names: Vec::new(),
            read_buf: String::new(),
        };

        let request = wire::Request::Init{
            model: self.par_model.as_deref(),
            mode: self.par_mode.serialize(),
            disable_pipes: &self.par_disable_pipes,
            split_sentences: self.par_split_sentences,
        };

        let reply: wire::InitReply = client.round_trip(&request)?;

        if let Some(reason) = reply.error {
            return Err(RequestError::Engine(reason).into());
        }

        client.pipe_names = reply.pipe_names;

        Ok(client)
    }

    pub fn command(&mut self, command: String) -> &mut Self {
        self.par_command = command;
        self
    }

    pub fn model(&mut self, model: String) -> &mut Self {
        self.par_model = Some(model);
        self
    }

    pub fn mode(&mut self, mode: SplitMode) -> &mut Self {
        self.par_mode = mode;
        self
    }

    pub fn disable_pipes<I>(&mut self, pipes: I) -> &mut Self
    where
        I: IntoIterator<Item = String>,
    {
        self.par_disable_pipes.extend(pipes);
        self
    }

    pub fn split_sentences(&mut self, enabled: bool) -> &mut Self {
        self.par_split_sentences = enabled;
        self
    }
}

pub struct Client {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    pipe_names: Vec<String>,
    read_buf: String,
}

impl Client {
    /// Submits one line of text and blocks until the engine's analysis
    /// comes back.
    pub fn analyze(&mut self, text: &str) -> RequestResult<Sentence> {
        let request = wire::Request::Analyze{ text };
        let reply: wire::AnalyzeReply = self.round_trip(&request)?;

        if let Some(reason) = reply.error {
            return Err(RequestError::Engine(reason));
        }

        let sentence = reply.sentence.exists()?.deserialize()?;
        Ok(sentence)
    }

    /// The pipeline stage names the engine reported when it started.
    pub fn pipe_names(&self) -> &[String] {
        &self.pipe_names
    }

    fn round_trip<R>(&mut self, request: &wire::Request<'_>) -> RequestResult<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let stdin = match self.stdin.as_mut() {
            Some(stdin) => stdin,
            None => return Err(RequestError::EngineClosed),
        };

        let line = serde_json::to_string(request)?;
        stdin.write_all(line.as_bytes())?;
        stdin.write_all(b"\n")?;
        stdin.flush()?;

        self.read_buf.clear();
        if self.stdout.read_line(&mut self.read_buf)? == 0 {
            return Err(RequestError::EngineClosed);
        }

        let reply = serde_json::from_str(&self.read_buf)?;
        Ok(reply)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        // Closing stdin signals end of input, which a healthy engine
        // follows by exiting. Kill it if it is still running once the
        // grace period runs out.
        drop(self.stdin.take());

        let start = Instant::now();
        loop {
            match self.child.try_wait() {
                Ok(None) => {},
                _ => return,
            }

            if start.elapsed() > REAP_GRACE {
                break;
            }

            thread::sleep(REAP_POLL);
        }

        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_reaps_stuck_engine() {
        let mut child = Command::new("sleep")
            .arg("30")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();

        let stdin = child.stdin.take().unwrap();
        let stdout = BufReader::new(child.stdout.take().unwrap());

        let client = Client{
            child,
            stdin: Some(stdin),
            stdout,
            pipe_names: Vec::new(),
            read_buf: String::new(),
        };

        let start = Instant::now();
        drop(client);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
