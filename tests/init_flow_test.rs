//! End-to-end test of the mount flow against a stub node
//!
//! Verifies that:
//! 1. The routine logs the genesis hash and the account summary, in order
//! 2. Events flow into the app console without touching the page
//! 3. A failing node leaves the page intact and surfaces an error line

use anyhow::{anyhow, Result};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use chainpeek::app::{App, InitStatus};
use chainpeek::domain::{AccountData, AccountInfo, GenesisHash, Moment};
use chainpeek::infrastructure::runtime::init_sequence;
use chainpeek::infrastructure::substrate::{parse_address, AccountId32, ChainProvider};
use chainpeek::infrastructure::RuntimeEvent;
use chainpeek::{config, ui};

struct FixedNode {
    offline: bool,
}

#[async_trait::async_trait]
impl ChainProvider for FixedNode {
    async fn genesis_hash(&self) -> Result<GenesisHash> {
        if self.offline {
            return Err(anyhow!("connection refused"));
        }
        Ok(GenesisHash([0xAA; 32]))
    }

    async fn timestamp_now(&self) -> Result<Moment> {
        Ok(1000)
    }

    async fn account(&self, _account: &AccountId32) -> Result<AccountInfo> {
        Ok(AccountInfo {
            nonce: 0,
            data: AccountData {
                free: 500,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn chain_name(&self) -> Result<String> {
        Ok("Fixed".into())
    }

    fn endpoint_name(&self) -> String {
        "fixed://".into()
    }
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect::<String>()
}

async fn mount_against(node: &FixedNode) -> App {
    let address = parse_address(config::DEFAULT_ADDRESS).expect("default address is valid");
    let mut app = App::new();
    assert!(app.mount());

    let mut events = Vec::new();
    let result = init_sequence(node, &address, |evt| events.push(evt)).await;
    if let Err(err) = result {
        events.push(RuntimeEvent::Error {
            message: format!("{err:#}"),
        });
    }
    for event in events {
        app.apply_event(event);
    }
    app
}

#[tokio::test]
async fn test_stub_node_logs_exact_lines() {
    let app = mount_against(&FixedNode { offline: false }).await;

    let lines: Vec<&str> = app.console().iter().map(|l| l.text.as_str()).collect();
    let genesis = format!("0x{}", "aa".repeat(32));
    assert_eq!(
        lines,
        vec![genesis.as_str(), "1000: balance of 500 and a nonce of 0"]
    );
    assert_eq!(app.status, InitStatus::Done);
    assert!(screen(&app).contains(ui::INSTRUCTIONS));
}

#[tokio::test]
async fn test_offline_node_does_not_break_page() {
    let mut app = mount_against(&FixedNode { offline: true }).await;

    assert_eq!(app.status, InitStatus::Failed);
    assert_eq!(app.console().len(), 1);
    assert!(app.console()[0].is_error());

    let page = screen(&app);
    assert!(page.contains(ui::INSTRUCTIONS));
    assert!(page.contains(ui::LINK_URL));

    // mounting again is a no-op
    assert!(!app.mount());
}
