use rawhttp::http::HttpError;
use rawhttp::http::parser::parse_headers;
use rawhttp::http::reader::{read_body, read_header_block, read_status_line};
use rawhttp::http::request::HeaderMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

#[tokio::test]
async fn test_status_line_stops_at_line_feed() {
    let mut reader = BufReader::new(&b"GET /1 HTTP/1.1\r\nHost: a\r\n\r\n"[..]);

    let line = read_status_line(&mut reader).await.unwrap();
    assert_eq!(line, "GET /1 HTTP/1.1\r\n");

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).await.unwrap();
    assert_eq!(rest, b"Host: a\r\n\r\n");
}

#[tokio::test]
async fn test_status_line_across_partial_reads() {
    let (client, server) = tokio::io::duplex(4);
    let mut reader = BufReader::new(server);

    let writer = tokio::spawn(async move {
        let mut client = client;
        for piece in [&b"GE"[..], b"T / HT", b"TP/1.1", b"\r\nrest"] {
            client.write_all(piece).await.unwrap();
        }
        client
    });

    let line = read_status_line(&mut reader).await.unwrap();
    assert_eq!(line, "GET / HTTP/1.1\r\n");
    drop(writer.await.unwrap());
}

#[tokio::test]
async fn test_status_line_closed_before_line_feed() {
    let mut reader = BufReader::new(&b"GET / HTTP/1.1"[..]);

    let result = read_status_line(&mut reader).await;
    assert!(matches!(result, Err(HttpError::TransportRead { .. })));
}

#[tokio::test]
async fn test_status_line_empty_stream() {
    let mut reader = BufReader::new(&b""[..]);

    let result = read_status_line(&mut reader).await;
    assert!(matches!(result, Err(HttpError::ClosedBeforeRequest)));
}

#[tokio::test]
async fn test_header_block_with_overread() {
    let mut reader = &b"Host: a\r\nContent-Length: 5\r\n\r\nhel"[..];

    let block = read_header_block(&mut reader).await.unwrap();

    assert_eq!(block.headers, b"Host: a\r\nContent-Length: 5");
    assert_eq!(block.overread, b"hel");
}

#[tokio::test]
async fn test_header_block_empty() {
    let mut reader = &b"\r\n"[..];

    let block = read_header_block(&mut reader).await.unwrap();

    assert!(block.headers.is_empty());
    assert!(block.overread.is_empty());
}

#[tokio::test]
async fn test_header_block_terminator_split_across_reads() {
    let (client, mut server) = tokio::io::duplex(64);

    let writer = tokio::spawn(async move {
        let mut client = client;
        for piece in [&b"Host: a\r"[..], b"\n", b"\r", b"\nbody"] {
            client.write_all(piece).await.unwrap();
            client.flush().await.unwrap();
            tokio::task::yield_now().await;
        }
        client
    });

    let block = read_header_block(&mut server).await.unwrap();
    assert_eq!(block.headers, b"Host: a");
    let _client = writer.await.unwrap();
}

#[tokio::test]
async fn test_header_block_larger_than_one_chunk() {
    let value = "v".repeat(2000);
    let raw = format!("X-Big: {value}\r\nHost: a\r\n\r\n");
    let mut reader = raw.as_bytes();

    let block = read_header_block(&mut reader).await.unwrap();
    let headers = parse_headers(&block.headers);

    assert_eq!(headers.get("x-big"), Some(value.as_str()));
    assert_eq!(headers.get("host"), Some("a"));
}

#[tokio::test]
async fn test_header_block_closed_before_terminator() {
    let mut reader = &b"Host: a\r\n"[..];

    let result = read_header_block(&mut reader).await;
    assert!(matches!(result, Err(HttpError::TransportRead { .. })));
}

#[tokio::test]
async fn test_body_without_content_length_is_empty() {
    let mut reader = &b"ignored"[..];

    let body = read_body(&mut reader, &HeaderMap::new(), b"over".to_vec())
        .await
        .unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_body_concatenates_overread_then_wire() {
    let headers: HeaderMap = [("content-length", "11")].into_iter().collect();
    let mut reader = &b"o World"[..];

    let body = read_body(&mut reader, &headers, b"Hell".to_vec()).await.unwrap();
    assert_eq!(body, b"Hello World");
}

#[tokio::test]
async fn test_body_fully_overread() {
    let headers: HeaderMap = [("content-length", "3")].into_iter().collect();
    let mut reader = &b""[..];

    let body = read_body(&mut reader, &headers, b"abcdef".to_vec()).await.unwrap();
    assert_eq!(body, b"abc");
}

#[tokio::test]
async fn test_body_zero_length() {
    let headers: HeaderMap = [("content-length", "0")].into_iter().collect();
    let mut reader = &b"extra"[..];

    let body = read_body(&mut reader, &headers, Vec::new()).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_body_invalid_content_length() {
    for value in ["abc", "-1", "1.5", ""] {
        let headers: HeaderMap = [("content-length", value)].into_iter().collect();
        let mut reader = &b"data"[..];

        let result = read_body(&mut reader, &headers, Vec::new()).await;
        assert!(
            matches!(result, Err(HttpError::ClientProtocol { .. })),
            "{value:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_body_truncated_by_peer() {
    let headers: HeaderMap = [("content-length", "10")].into_iter().collect();
    let mut reader = &b"abc"[..];

    let result = read_body(&mut reader, &headers, b"xy".to_vec()).await;
    assert!(matches!(result, Err(HttpError::TransportRead { .. })));
}

#[tokio::test]
async fn test_body_huge_declared_length_with_short_stream() {
    for value in ["18446744073709551615", "4611686018427387904"] {
        let headers: HeaderMap = [("content-length", value)].into_iter().collect();
        let mut reader = &b"abcd"[..];

        let result = read_body(&mut reader, &headers, b"xy".to_vec()).await;
        assert!(
            matches!(result, Err(HttpError::TransportRead { .. })),
            "{value:?} should end in a read error"
        );
    }
}

#[tokio::test]
async fn test_body_arrives_in_pieces() {
    let headers: HeaderMap = [("content-length", "8")].into_iter().collect();
    let (client, mut server) = tokio::io::duplex(2);

    let writer = tokio::spawn(async move {
        let mut client = client;
        client.write_all(b"cdefgh").await.unwrap();
        client
    });

    let body = read_body(&mut server, &headers, b"ab".to_vec()).await.unwrap();
    assert_eq!(body, b"abcdefgh");
    let _client = writer.await.unwrap();
}
