//! Scripted stand-ins for crews and agents.

use async_trait::async_trait;
use cf_core::agents::{Agent, AgentError, AgentEvent, AgentEventStream, ExecutionContext};
use cf_core::crew::{CrewError, CrewOutput, CrewResult, Inputs, Kickoff};
use cf_core::poem::{PoemCrews, DALE_CREW, IMAGE_CREW, POEM_CREW};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const POEM_TEXT: &str = "POEM_TEXT";
pub const DESC_TEXT: &str = "DESC_TEXT";
pub const IMG_TEXT: &str = "IMG_TEXT";

/// One recorded kickoff.
#[derive(Debug, Clone)]
pub struct KickoffCall {
    pub crew: String,
    pub inputs: Inputs,
    pub started: Instant,
    pub finished: Instant,
}

/// Kickoffs shared by every crew of a test, in completion order.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<KickoffCall>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<KickoffCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn calls_to(&self, crew: &str) -> Vec<KickoffCall> {
        self.calls().into_iter().filter(|c| c.crew == crew).collect()
    }

    fn record(&self, call: KickoffCall) {
        self.0.lock().unwrap().push(call);
    }
}

/// A crew that answers every kickoff with a fixed reply.
pub struct ScriptedCrew {
    name: String,
    reply: Result<String, String>,
    delay: Duration,
    log: CallLog,
}

impl ScriptedCrew {
    pub fn replying(name: &str, text: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            log: log.clone(),
        }
    }

    pub fn failing(name: &str, message: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            reply: Err(message.to_string()),
            delay: Duration::ZERO,
            log: log.clone(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Kickoff for ScriptedCrew {
    async fn kickoff(&self, inputs: Inputs) -> CrewResult<CrewOutput> {
        let started = Instant::now();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.log.record(KickoffCall {
            crew: self.name.clone(),
            inputs,
            started,
            finished: Instant::now(),
        });

        match &self.reply {
            Ok(text) => Ok(CrewOutput::from_raw(text.clone())),
            Err(message) => Err(CrewError::Agent {
                crew: self.name.clone(),
                task: "scripted".to_string(),
                source: AgentError::ExecutionError(message.clone()),
            }),
        }
    }
}

/// Poem, image and dale crews replying with the `*_TEXT` constants.
pub fn scripted_crews(log: &CallLog) -> PoemCrews {
    PoemCrews {
        poem: Arc::new(ScriptedCrew::replying(POEM_CREW, POEM_TEXT, log)),
        image: Arc::new(ScriptedCrew::replying(IMAGE_CREW, DESC_TEXT, log)),
        dale: Arc::new(ScriptedCrew::replying(DALE_CREW, IMG_TEXT, log)),
    }
}

/// An agent that answers with a fixed text and keeps every context it saw.
#[derive(Clone)]
pub struct RecordingAgent {
    reply: String,
    seen: Arc<Mutex<Vec<ExecutionContext>>>,
}

impl RecordingAgent {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn contexts(&self) -> Vec<ExecutionContext> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Agent for RecordingAgent {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn execute(&self, context: &ExecutionContext) -> Result<AgentEventStream, AgentError> {
        self.seen.lock().unwrap().push(context.clone());
        let reply = self.reply.clone();
        let stream = async_stream::stream! {
            yield Ok(AgentEvent::Thought("recording".to_string()));
            yield Ok(AgentEvent::MessageChunk(reply));
            yield Ok(AgentEvent::Completed);
        };
        Ok(Box::pin(stream))
    }
}
