//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Tests for Session and Tl1Client over in-memory and loopback streams

use std::sync::Arc;
use tl1kit_client::{ClientConfig, ClientError, Session, Tl1Client};
use tl1kit_codec::{
    CodecError, Command, CommandCode, ParameterBlock, StandardVendor, StatusCode, Terminator,
    Tl1Message,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};
use tokio::net::TcpListener;
use tokio::time::{Duration, Instant, timeout};

// ============================================================================
// Helper Functions
// ============================================================================

fn reply(ctag: &str, status: &str, body: &str, terminator: char) -> String {
    format!("\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  {ctag} {status}\r\n{body}{terminator}")
}

fn client_pair() -> (Tl1Client<DuplexStream>, DuplexStream) {
    let (client, server) = duplex(8192);
    let session = Session::from_stream(client, ClientConfig::default());
    (Tl1Client::with_session(session, Arc::new(StandardVendor)), server)
}

fn command(ctag: &str) -> Command {
    Command::from_code(CommandCode::new("LST").with_mod1("ONU")).with_ctag(ctag)
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn get_response_times_out_after_deadline() {
    let (client, _server) = duplex(64);
    let mut session = Session::from_stream(client, ClientConfig::default());

    let start = Instant::now();
    let result = session.get_response(Duration::from_secs(1)).await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(ClientError::Timeout(_))));
    assert!(elapsed >= Duration::from_secs(1), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "returned late: {elapsed:?}");
}

#[tokio::test]
async fn writes_are_iac_escaped() {
    let (client, mut server) = duplex(64);
    let mut session = Session::from_stream(client, ClientConfig::default());

    session.write_raw(b"\xFFA").await.unwrap();
    let mut buf = [0u8; 3];
    server.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"\xFF\xFFA");
}

#[tokio::test]
async fn peer_close_disconnects() {
    let (client, server) = duplex(64);
    let mut session = Session::from_stream(client, ClientConfig::default());
    drop(server);

    assert!(matches!(
        session.get_response(Duration::from_secs(1)).await,
        Err(ClientError::ConnectionClosed)
    ));
    assert!(!session.is_connected());
    assert!(!session.close());
}

#[tokio::test]
async fn connect_requires_address() {
    let mut session = Session::new(ClientConfig::default().with_host("127.0.0.1"));
    assert!(matches!(
        session.connect().await,
        Err(ClientError::MissingAddress)
    ));
}

#[tokio::test]
async fn connect_twice_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut session = Session::new(ClientConfig::new("127.0.0.1", port));
    session.connect().await.unwrap();
    assert!(session.is_connected());
    assert!(matches!(
        session.connect().await,
        Err(ClientError::AlreadyConnected)
    ));
    assert!(session.close());
    assert!(!session.close());
}

#[tokio::test]
async fn connect_refused_is_io_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut session = Session::new(ClientConfig::new("127.0.0.1", port));
    let err = session.connect().await.unwrap_err();
    assert!(matches!(err, ClientError::Io(_)), "unexpected {err:?}");
    assert!(err.is_connection_error());
}

// ============================================================================
// Client Tests
// ============================================================================

#[tokio::test]
async fn execute_without_session() {
    let mut client = Tl1Client::new(Arc::new(StandardVendor));
    assert!(!client.is_connected());
    assert!(matches!(
        client.execute(&command("1")).await,
        Err(ClientError::NotConnected)
    ));
    assert!(!client.close());
}

#[tokio::test]
async fn execute_writes_and_classifies() {
    let (mut client, mut server) = client_pair();
    server
        .write_all(reply("7", "COMPLD", "   EN=0\r\n", ';').as_bytes())
        .await
        .unwrap();

    let message = client.execute(&command("7")).await.unwrap().unwrap();
    let response = message.into_response().unwrap();
    assert_eq!(response.ctag(), "7");
    assert_eq!(response.status(), StatusCode::Completed);

    let mut wire = vec![0u8; "LST-ONU:::7::;".len()];
    server.read_exact(&mut wire).await.unwrap();
    assert_eq!(wire, b"LST-ONU:::7::;");
}

#[tokio::test]
async fn replies_are_returned_in_order() {
    let (mut client, mut server) = client_pair();
    let queued = format!(
        "{}{}",
        reply("1", "COMPLD", "   first\r\n", ';'),
        reply("2", "DENY", "   second\r\n", ';')
    );
    server.write_all(queued.as_bytes()).await.unwrap();

    let first = client.execute(&command("1")).await.unwrap().unwrap();
    let second = client.execute(&command("2")).await.unwrap().unwrap();

    let first = first.into_response().unwrap();
    let second = second.into_response().unwrap();
    assert_eq!((first.ctag(), first.text.as_str()), ("1", "   first\r\n"));
    assert_eq!((second.ctag(), second.status()), ("2", StatusCode::Denied));
}

#[tokio::test]
async fn ill_formed_command_is_not_sent() {
    let (mut client, mut server) = client_pair();

    let result = client.execute(&Command::new("BAD VERB")).await.unwrap();
    assert!(result.is_none());

    let mut buf = [0u8; 1];
    assert!(
        timeout(Duration::from_millis(50), server.read(&mut buf))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn autonomous_message_in_place_of_reply() {
    let (mut client, mut server) = client_pair();
    server
        .write_all(b"\r\n\n   OLT-1 2024-03-05 14:07:09\r\nA 88 REPT EVT\r\n   \"PON UP\"\r\n;")
        .await
        .unwrap();

    let message = client.execute(&command("3")).await.unwrap().unwrap();
    assert!(matches!(message, Tl1Message::Autonomous(_)));
    assert_eq!(message.ctag(), None);
}

#[tokio::test]
async fn execute_complete_collects_blocks() {
    let (mut client, mut server) = client_pair();
    let stream = [
        "\r\n\n   IP 5<".to_string(),
        reply("4", "COMPLD", "   stale\r\n", ';'),
        "\r\n\n   OLT-1 2024-03-05 14:07:09\r\n** 12 REPT ALM ONU\r\n   \"LOS\"\r\n;".to_string(),
        reply("5", "COMPLD", "   block one\r\n", '>'),
        reply("5", "COMPLD", "   block two\r\n", ';'),
    ]
    .concat();
    server.write_all(stream.as_bytes()).await.unwrap();

    let exchange = client.execute_complete(&command("5")).await.unwrap().unwrap();
    assert_eq!(exchange.acknowledgments.len(), 1);
    assert_eq!(exchange.acknowledgments[0].code, "IP");
    assert_eq!(exchange.autonomous.len(), 1);
    assert_eq!(exchange.uncorrelated.len(), 1);
    assert_eq!(exchange.uncorrelated[0].ctag(), Some("4"));
    assert_eq!(exchange.responses.len(), 2);
    assert_eq!(exchange.responses[0].terminator, Terminator::Continue);
    assert_eq!(exchange.response().map(|r| r.text.as_str()), Some("   block two\r\n"));
}

#[tokio::test]
async fn malformed_reply_is_a_protocol_error() {
    let (mut client, mut server) = client_pair();
    server
        .write_all(b"\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  9 MAYBE\r\n;")
        .await
        .unwrap();

    let err = client.execute(&command("9")).await.unwrap_err();
    assert!(err.is_protocol_error(), "unexpected {err:?}");
    assert!(client.is_connected());
}

#[tokio::test]
async fn non_ascii_reply_fails_only_its_exchange() {
    let (mut client, mut server) = client_pair();
    let mut queued = b"\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  1 COMPLD\r\n   NAME=caf\xE9\r\n;".to_vec();
    queued.extend_from_slice(reply("2", "COMPLD", "   EN=0\r\n", ';').as_bytes());
    server.write_all(&queued).await.unwrap();

    let err = client.execute(&command("1")).await.unwrap_err();
    assert!(
        matches!(
            err,
            ClientError::Codec(CodecError::NonAsciiResponse {
                character: '\u{e9}',
                ..
            })
        ),
        "unexpected {err:?}"
    );
    assert!(err.is_recoverable());
    assert!(client.is_connected());

    let second = client.execute(&command("2")).await.unwrap().unwrap();
    let second = second.into_response().unwrap();
    assert_eq!(second.ctag(), "2");
    assert_eq!(second.status(), StatusCode::Completed);
}

#[tokio::test]
async fn loopback_login() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let element = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        while !received.ends_with(b";") {
            let mut buf = [0u8; 256];
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client hung up before sending a command");
            received.extend_from_slice(&buf[..n]);
        }
        socket.write_all(b"\r\n\n      OK CTAG<").await.unwrap();
        String::from_utf8(received).unwrap()
    });

    let config = ClientConfig::new("127.0.0.1", port).with_response_timeout(Duration::from_secs(2));
    let mut client = Tl1Client::connect(config, Arc::new(StandardVendor))
        .await
        .unwrap();
    let login = Command::new("LOGIN").with_payload(
        ParameterBlock::new()
            .with_field("username", "UN", "admin")
            .with_field("password", "PWD", "secret"),
    );
    let message = client.execute(&login).await.unwrap().unwrap();
    match message {
        Tl1Message::Acknowledgment(ack) => {
            assert_eq!(ack.code, "OK");
            assert_eq!(ack.ctag, "CTAG");
        }
        other => panic!("expected acknowledgment, got {other:?}"),
    }
    assert!(client.close());
    assert!(!client.close());

    assert_eq!(element.await.unwrap(), "LOGIN:::CTAG::UN=admin,PWD=secret;");
}
