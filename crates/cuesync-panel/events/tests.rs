//! Tests for the panel event channel

use super::*;
use core::cell::RefCell;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

struct TestHandler {
    name: &'static str,
    log: Log,
    filter: EventFilter,
    priority: i32,
    fail: bool,
}

impl TestHandler {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            filter: EventFilter::new(),
            priority: 0,
            fail: false,
        }
    }

    fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl EventHandler for TestHandler {
    fn handle_event(&mut self, event: &PanelEvent) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.name, event.event_type_name()));
        if self.fail {
            return Err(PanelError::handler(self.name));
        }
        Ok(())
    }

    fn event_filter(&self) -> EventFilter {
        self.filter.clone()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

fn highlight(chunk_index: usize) -> PanelEvent {
    PanelEvent::HighlightChanged {
        chunk_index,
        word_range: Some(WordRange::new(0, 1)),
    }
}

#[test]
fn event_descriptions() {
    assert_eq!(highlight(2).description(), "Highlighted words 0..=1 of chunk 2");
    assert_eq!(
        PanelEvent::HighlightChanged {
            chunk_index: 3,
            word_range: None
        }
        .description(),
        "Highlighted chunk 3"
    );
    assert_eq!(
        PanelEvent::LanguageChanged {
            from: String::new(),
            to: "fr".to_string()
        }
        .description(),
        "Language changed from none to fr"
    );
    assert_eq!(
        PanelEvent::TranscriptLoaded {
            language: None,
            chunks: 0,
            words: 0
        }
        .description(),
        "Loaded empty transcript"
    );
}

#[test]
fn event_categories() {
    assert!(highlight(0).is_highlight());
    assert!(PanelEvent::HighlightCleared.is_highlight());
    assert!(!PanelEvent::PanelClosed.is_highlight());
    assert!(PanelEvent::AutoscrollCancelled { generation: 1 }.is_autoscroll());
}

#[test]
fn filter_include_and_exclude() {
    let filter = EventFilter::new().include_types(["HighlightChanged", "HighlightCleared"]);
    assert!(filter.matches(&highlight(0)));
    assert!(!filter.matches(&PanelEvent::PanelClosed));

    let filter = EventFilter::new()
        .include_highlight(true)
        .exclude_types(["HighlightCleared"]);
    assert!(filter.matches(&highlight(0)));
    assert!(!filter.matches(&PanelEvent::HighlightCleared));

    let filter = EventFilter::new().include_autoscroll(false);
    assert!(!filter.matches(&PanelEvent::AutoscrollFinished { generation: 0 }));
    assert!(filter.matches(&PanelEvent::PanelClosed));
}

#[test]
fn handler_registration() {
    let log = Log::default();
    let mut channel = EventChannel::new();
    let id = channel
        .register_handler(Box::new(TestHandler::new("a", &log)))
        .unwrap();
    assert_eq!(channel.stats().handlers_count, 1);
    assert!(channel.unregister_handler(id));
    assert!(!channel.unregister_handler(id));
    assert_eq!(channel.stats().handlers_count, 0);
}

#[test]
fn handler_limit() {
    let log = Log::default();
    let mut channel = EventChannel::with_config(EventChannelConfig {
        max_handlers: 1,
        ..EventChannelConfig::default()
    });
    channel
        .register_handler(Box::new(TestHandler::new("a", &log)))
        .unwrap();
    let err = channel
        .register_handler(Box::new(TestHandler::new("b", &log)))
        .unwrap_err();
    assert_eq!(err, PanelError::HandlerLimit { limit: 1 });
}

#[test]
fn dispatch_respects_priority_and_filters() {
    let log = Log::default();
    let mut channel = EventChannel::new();
    channel
        .register_handler(Box::new(TestHandler::new("low", &log)))
        .unwrap();
    channel
        .register_handler(Box::new(TestHandler::new("high", &log).with_priority(10)))
        .unwrap();
    channel
        .register_handler(Box::new(
            TestHandler::new("scroll", &log)
                .with_filter(EventFilter::new().include_autoscroll(true)),
        ))
        .unwrap();

    channel.dispatch(highlight(1)).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["high:HighlightChanged", "low:HighlightChanged"]
    );
    assert_eq!(channel.stats().events_dispatched, 1);
    assert_eq!(channel.stats().events_filtered, 1);
}

#[test]
fn failing_handler_does_not_starve_others() {
    let log = Log::default();
    let mut channel = EventChannel::new();
    channel
        .register_handler(Box::new(TestHandler::new("bad", &log).failing().with_priority(5)))
        .unwrap();
    channel
        .register_handler(Box::new(TestHandler::new("good", &log)))
        .unwrap();

    let err = channel.dispatch(PanelEvent::PanelClosed).unwrap_err();
    assert_eq!(err, PanelError::handler("bad"));
    assert_eq!(*log.borrow(), vec!["bad:PanelClosed", "good:PanelClosed"]);
}

#[test]
fn closures_are_handlers() {
    let count = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&count);
    let mut channel = EventChannel::new();
    channel
        .register_handler(Box::new(move |_: &PanelEvent| -> Result<()> {
            *seen.borrow_mut() += 1;
            Ok(())
        }))
        .unwrap();

    channel.dispatch(PanelEvent::HighlightCleared).unwrap();
    channel.dispatch(PanelEvent::PanelClosed).unwrap();
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn async_stream_receives_events() {
    let mut channel = EventChannel::new();
    assert!(!channel.has_async_subscriber());

    let mut receiver = channel.subscribe_async();
    channel.dispatch(highlight(4)).unwrap();
    channel.dispatch(PanelEvent::HighlightCleared).unwrap();
    assert_eq!(channel.stats().async_events_queued, 2);

    let first = futures::executor::block_on(receiver.next());
    assert_eq!(first, Some(highlight(4)));
    let second = futures::executor::block_on(receiver.next());
    assert_eq!(second, Some(PanelEvent::HighlightCleared));

    drop(receiver);
    channel.dispatch(PanelEvent::PanelClosed).unwrap();
    assert!(!channel.has_async_subscriber());
}
