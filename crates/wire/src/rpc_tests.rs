// SPDX-License-Identifier: MIT

use super::*;
use fc_core::Error;

#[test]
fn user_login_round_trips_through_json() {
    let req = Request::UserLogin {
        username: "nefix".into(),
        password: "f0cKt3Rf$".into(),
    };
    let json = serde_json::to_string(&req).unwrap();
    let back: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(back, req);
}

#[test]
fn agent_install_is_a_chunk_sequence_terminated_by_end() {
    let chunk = Request::AgentInstallChunk {
        host: "10.0.0.1".into(),
        ssh_port: 22,
        ssh_user: "root".into(),
        ssh_password: "hunter2".into(),
        bin_chunk: vec![1, 2, 3],
    };
    let end = Request::AgentInstallEnd;
    for req in [chunk, end] {
        let json = serde_json::to_string(&req).unwrap();
        let back: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}

#[test]
fn job_schedule_time_defaults_to_none_when_omitted() {
    let json = r#"{"type":"JobSchedule","agent_host":"h","name":"n","config":"{}"}"#;
    let req: Request = serde_json::from_str(json).unwrap();
    match req {
        Request::JobSchedule { time, .. } => assert!(time.is_none()),
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn response_from_error_carries_the_status_and_message_verbatim() {
    let err = Error::invalid_argument("the password requires, at least, a length of 8 characters");
    let resp = Response::from_error(&err);
    match resp {
        Response::Error { status, message } => {
            assert_eq!(status, Status::InvalidArgument);
            assert_eq!(
                message,
                "invalid argument: the password requires, at least, a length of 8 characters"
            );
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn job_cancel_shape_exists_even_though_unimplemented() {
    let req = Request::JobCancel { id: 1 };
    let json = serde_json::to_string(&req).unwrap();
    let back: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(back, req);
}

#[test]
fn request_envelope_omits_token_for_login() {
    let env = RequestEnvelope {
        token: None,
        request: Request::UserLogin {
            username: "nefix".into(),
            password: "f0cKt3Rf$".into(),
        },
    };
    let json = serde_json::to_string(&env).unwrap();
    let back: RequestEnvelope = serde_json::from_str(&json).unwrap();
    assert_eq!(back, env);
    assert!(!json.contains("\"token\":null") || env.token.is_none());
}

#[test]
fn request_envelope_carries_the_bearer_token_alongside_other_calls() {
    let env = RequestEnvelope {
        token: Some("tkn-value".into()),
        request: Request::AgentList,
    };
    let json = serde_json::to_string(&env).unwrap();
    let back: RequestEnvelope = serde_json::from_str(&json).unwrap();
    assert_eq!(back, env);
}
