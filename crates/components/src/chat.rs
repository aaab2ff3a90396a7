use patternfly_yew::prelude::*;
use vulntracker_ui_backend::{use_backend, ChatService};
use yew::prelude::*;
use yew_more_hooks::prelude::*;
use yew_oauth2::{openid::*, prelude::*};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
struct ChatEntry {
    role: Role,
    content: String,
}

/// The floating assistant panel.
///
/// Sits in the lower right corner of every page. Only authenticated users get
/// the input form, as the backend requires a token for completions. A failed
/// or timed out request shows up in the transcript instead of a toast, so the
/// conversation keeps its context.
#[function_component(ChatPanel)]
pub fn chat_panel() -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let auth = use_auth_state();
    let agent = use_auth_agent().expect("Requires OAuth2Context component in parent hierarchy");

    let expanded = use_state_eq(|| false);
    let transcript = use_state(Vec::<ChatEntry>::new);
    let input = use_state_eq(String::new);
    // message currently in flight, if any
    let pending = use_state_eq(|| Option::<String>::None);

    let _sending = use_async_with_cloned_deps(
        {
            let transcript = transcript.clone();
            let pending = pending.clone();
            move |message: Option<String>| {
                let service = ChatService::new(backend.clone(), access_token.clone());
                async move {
                    let Some(message) = message else {
                        return Ok::<_, String>(());
                    };
                    let content = match service.send(&message).await {
                        Ok(response) => response.response,
                        Err(err) => format!("The assistant is not available right now ({err})"),
                    };
                    let mut entries = (*transcript).clone();
                    entries.push(ChatEntry {
                        role: Role::Assistant,
                        content,
                    });
                    transcript.set(entries);
                    pending.set(None);
                    Ok(())
                }
            }
        },
        (*pending).clone(),
    );

    let ontoggle = use_callback(expanded.clone(), |_, expanded| {
        expanded.set(!**expanded);
    });

    let oninput = use_callback(input.clone(), |value: String, input| input.set(value));

    let onsubmit = use_callback(
        (input.clone(), transcript.clone(), pending.clone()),
        |_, (input, transcript, pending)| {
            let message = input.trim().to_string();
            if message.is_empty() || pending.is_some() {
                return;
            }
            let mut entries = (**transcript).clone();
            entries.push(ChatEntry {
                role: Role::User,
                content: message.clone(),
            });
            transcript.set(entries);
            input.set(String::new());
            pending.set(Some(message));
        },
    );

    let onlogin = use_callback((), move |_, _| {
        if let Err(err) = agent.start_login() {
            log::warn!("Failed to start login: {err}");
        }
    });

    if !*expanded {
        return html!(
            <div class="vulntracker-chat vulntracker-chat--collapsed">
                <Button
                    icon={Icon::QuestionCircle}
                    variant={ButtonVariant::Primary}
                    onclick={ontoggle}
                >
                    { "Assistant" }
                </Button>
            </div>
        );
    }

    let authenticated = matches!(auth, Some(OAuth2Context::Authenticated(..)));

    html!(
        <div class="vulntracker-chat">
            <Card>
                <CardTitle>
                    <Split>
                        <SplitItem fill=true>
                            <Title>{ "Security assistant" }</Title>
                        </SplitItem>
                        <SplitItem>
                            <Button
                                icon={Icon::Times}
                                variant={ButtonVariant::Plain}
                                onclick={ontoggle}
                            />
                        </SplitItem>
                    </Split>
                </CardTitle>
                <CardBody>
                    { for transcript.iter().map(|entry| {
                        let class = match entry.role {
                            Role::User => "vulntracker-chat__entry vulntracker-chat__entry--user",
                            Role::Assistant => "vulntracker-chat__entry vulntracker-chat__entry--assistant",
                        };
                        html!(<div {class}>{ &entry.content }</div>)
                    })}
                    if pending.is_some() {
                        <div class="vulntracker-chat__entry vulntracker-chat__entry--assistant">
                            <Spinner/>
                        </div>
                    }
                </CardBody>
                <CardFooter>
                    if authenticated {
                        <InputGroup>
                            <InputGroupItem fill=true>
                                <TextInput
                                    placeholder="Ask about a vulnerability"
                                    value={(*input).clone()}
                                    onchange={oninput}
                                />
                            </InputGroupItem>
                            <InputGroupItem>
                                <Button
                                    icon={Icon::ArrowRight}
                                    variant={ButtonVariant::Control}
                                    disabled={input.trim().is_empty() || pending.is_some()}
                                    onclick={onsubmit}
                                />
                            </InputGroupItem>
                        </InputGroup>
                    } else {
                        <Button variant={ButtonVariant::Link} onclick={onlogin}>
                            { "Sign in to use the assistant" }
                        </Button>
                    }
                </CardFooter>
            </Card>
        </div>
    )
}
